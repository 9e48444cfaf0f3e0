use thiserror::Error;

use crate::TunableKey;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown tunable {subsystem}.{name}")]
    UnknownKey { subsystem: String, name: String },

    #[error("tunable {key} expects a {expected} value, got {got}")]
    TypeMismatch {
        key:      TunableKey,
        expected: &'static str,
        got:      &'static str,
    },

    #[error("tunable parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
