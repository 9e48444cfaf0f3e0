//! Framework error type.
//!
//! Sub-crates define their own error enums; `TcError` covers the few
//! fallible operations of `tc-core` itself.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TcError {
    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `tc-core`.
pub type TcResult<T> = Result<T, TcError>;
