use thiserror::Error;

use crate::WiringViolation;

/// Construction and lifecycle errors of the graph itself.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("wiring order violation: {0}")]
    OutOfOrderBinding(WiringViolation),

    #[error("reserved output {name:?} was never registered")]
    UnfulfilledReservation { name: &'static str },

    #[error("snapshot field {field:?} has more than one connector")]
    DuplicateConnector { field: &'static str },

    #[error("{user} references output slot {slot}, which does not belong to this graph or has another type")]
    UnknownOutput { user: &'static str, slot: usize },

    #[error("graph has not been started")]
    NotStarted,

    #[error("graph has been stopped")]
    Stopped,
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Failure of a single calculator's `compute`.
///
/// Never aborts a tick; the executor logs it and keeps the unit's last good
/// output.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("input slot {slot} is unavailable")]
    MissingInput { slot: usize },

    #[error("{0}")]
    Failed(String),
}

pub type CalcResult<T> = Result<T, CalcError>;
