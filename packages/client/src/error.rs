//! Client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },

    #[error("connection closed")]
    ConnectionClosed,

    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode server message: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("not joined yet; use /join <name>")]
    NotJoined,

    #[error("a stroke needs at least one point")]
    EmptyPath,

    #[error("{0}")]
    InvalidCommand(String),

    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
