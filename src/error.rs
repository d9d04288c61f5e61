//! The error type shared by all the trees in this crate.
//!
//! Every failure is detected before the structure is touched, so a tree that
//! returned an error is left exactly as it was.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The arguments don't describe a valid operation, e.g. a record without a key.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The structure isn't in a state that allows the operation yet.
    #[error("precondition violated: {0}")]
    PreconditionViolated(&'static str),
    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
    /// The operation is part of the interface but has no implementation.
    #[error("operation `{0}` is not supported")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, TreeError>;
