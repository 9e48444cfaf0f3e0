use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FsmError {
    #[error("state machine {machine} has no initial state")]
    NoInitialState { machine: &'static str },

    #[error("state machine {machine} already has initial state {state}")]
    InitialAlreadySet { machine: &'static str, state: String },

    #[error("state machine {machine} has no handler for state {state}")]
    UnknownState { machine: &'static str, state: String },
}

pub type FsmResult<T> = Result<T, FsmError>;
