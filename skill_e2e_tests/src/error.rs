// error.rs - Error type shared by fixtures and the API client
//
// Two kinds of failure exist in an e2e run: setup errors (the database
// fixture could not be prepared) and assertion failures (the API answered
// with the wrong shape). Both are variants here so callers can tell them
// apart when a run fails.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum E2eError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("invalid value for {name}: {reason}")]
    InvalidConfig { name: &'static str, reason: String },

    #[error("fixture has no open database connection")]
    NotConnected,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response body from {url} is not JSON: {source}")]
    InvalidBody {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected response: {0}")]
    Mismatch(String),

    #[error("test body task did not finish: {0}")]
    BodyAborted(String),

    #[error("condition not met after {0:?}")]
    PollTimeout(Duration),
}

pub type Result<T> = std::result::Result<T, E2eError>;
