//! Report error model.

use thiserror::Error;

/// Failure while producing or writing the report artifact.
///
/// There is no retry and no partial-output recovery: a failing sink fails
/// the export action and nothing else.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("document sink error: {0}")]
    Sink(String),
}

impl ReportError {
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }
}
