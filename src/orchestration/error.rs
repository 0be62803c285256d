// Fri Oct 16 2026 - Alex

use crate::engine::EngineError;
use crate::source::SourceError;
use thiserror::Error;

/// The only conditions that stop a run. Everything else degrades per item.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("no films found; the page structure may have changed")]
    NoCandidates,
    #[error("fetch subsystem could not start: {0}")]
    FetchInit(String),
}

impl From<EngineError> for RunError {
    fn from(e: EngineError) -> Self {
        RunError::FetchInit(e.to_string())
    }
}

impl From<SourceError> for RunError {
    fn from(e: SourceError) -> Self {
        RunError::FetchInit(e.to_string())
    }
}
