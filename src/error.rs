use reqwest::StatusCode;
use thiserror::Error;

use crate::id::IdPrefix;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Monzo API error: {status} - {body}")]
    Api { status: StatusCode, body: String },

    #[error("Invalid identifier {id:?}: {}", expected_message(.expected))]
    InvalidId {
        id: String,
        expected: Option<IdPrefix>,
    },

    #[error("Refreshing a token requires app credentials")]
    MissingAppCredentials,

    #[error("No refresh token available for these credentials")]
    MissingRefreshToken,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

fn expected_message(expected: &Option<IdPrefix>) -> String {
    match expected {
        Some(prefix) => format!("expected prefix \"{}_\"", prefix),
        None => "no known prefix".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
