use reqwest::StatusCode;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("classifier returned HTTP {status}: {detail}")]
    Status { status: StatusCode, detail: String },
    #[error("classifier reported an error: {0}")]
    Reported(String),
    #[error("classifier response did not match the expected shape: {0}")]
    Malformed(String),
    #[error("request to classifier failed: {0}")]
    Transport(#[source] BoxError),
}

/// How a failed call surfaced. The view shows a different notice for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureChannel {
    /// The function answered, but with an error.
    Reported,
    /// The call itself blew up before an answer was read.
    Unexpected,
}

impl ClassifyError {
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        ClassifyError::Transport(err.into())
    }

    pub fn channel(&self) -> FailureChannel {
        match self {
            ClassifyError::Status { .. }
            | ClassifyError::Reported(_)
            | ClassifyError::Malformed(_) => FailureChannel::Reported,
            ClassifyError::Transport(_) => FailureChannel::Unexpected,
        }
    }
}
