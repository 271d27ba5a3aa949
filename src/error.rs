// src/error.rs
use thiserror::Error;

/// Request-fatal failures. Anything that goes wrong on a link other than the
/// seed is swallowed inside the analyzer and shows up only as a smaller
/// result set.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid URL provided: {0}")]
    InvalidUrl(String),

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
