//! Terminal client for the Rakugaki shared drawing board.
//!
//! Mirrors the committed history, previews strokes other participants are
//! drawing, shows their cursors and sends drawing gestures typed at the prompt.

pub mod command;
pub mod config;
mod connection;
pub mod error;
pub mod gesture;
pub mod live;
pub mod mirror;
pub mod presence;
pub mod prompt;
pub mod renderer;
pub mod session;

pub use config::ClientArgs;
pub use connection::run_client;
pub use error::ClientError;
