// Fri Oct 16 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("could not initialize fetch client: {0}")]
    Init(String),
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("parse error: {0}")]
    Parse(String),
}

pub type SourceResult<T> = Result<T, SourceError>;
