use std::{borrow::Cow, result};

use thiserror::Error;

/// A type alias for handling errors related to batstat.
pub type Result<T> = result::Result<T, BatstatError>;

/// An error that can occur while batstat runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatstatError {
    /// An error when there is an IO exception.
    #[error("IO exception, {0}")]
    InvalidIo(String),
    /// An error while reading a replay trace, with the (1-based) line it
    /// happened on.
    #[error("Replay error on line {line}, {reason}")]
    Replay { line: usize, reason: Cow<'static, str> },
    /// An error while collecting a snapshot, such as from the host battery.
    #[error("Collection error, {0}")]
    Collection(Cow<'static, str>),
    /// An error around the monitoring service lifecycle.
    #[error("Service error, {0}")]
    Service(Cow<'static, str>),
}

impl BatstatError {
    /// Create a new [`BatstatError::Replay`].
    pub fn replay<R: Into<Cow<'static, str>>>(line: usize, reason: R) -> Self {
        BatstatError::Replay {
            line,
            reason: reason.into(),
        }
    }

    /// Create a new [`BatstatError::Collection`].
    pub fn collection<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        BatstatError::Collection(reason.into())
    }

    /// Create a new [`BatstatError::Service`].
    pub fn service<R: Into<Cow<'static, str>>>(reason: R) -> Self {
        BatstatError::Service(reason.into())
    }
}

impl From<std::io::Error> for BatstatError {
    fn from(err: std::io::Error) -> Self {
        BatstatError::InvalidIo(err.to_string())
    }
}
