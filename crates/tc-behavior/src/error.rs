use tc_core::BotId;
use tc_fsm::FsmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("{0} is not in the current world frame")]
    BotMissing(BotId),

    #[error("state machine error: {0}")]
    Fsm(#[from] FsmError),

    #[error("behavior configuration error: {0}")]
    Config(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
