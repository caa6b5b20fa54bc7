pub use thiserror::Error;

/// Failure of a single status check. Every variant ends the poll.
#[derive(Error, Debug)]
pub enum PollError {
    #[error("Status request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Status endpoint answered with HTTP {0}")]
    HttpStatus(u16),

    #[error("Status body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
