use tc_behavior::BehaviorError;
use tc_config::ConfigError;
use tc_core::TeamColor;
use tc_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TeamError {
    #[error("tunable view belongs to team {view}, but this context plays {team}")]
    TeamMismatch { team: TeamColor, view: TeamColor },

    #[error("team context already stopped")]
    Stopped,

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("behavior error: {0}")]
    Behavior(#[from] BehaviorError),
}

pub type TeamResult<T> = Result<T, TeamError>;
