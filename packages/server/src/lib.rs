//! Rakugaki canvas server library.
//!
//! A single shared drawing session served over WebSocket. The server is the
//! authority for participant identity, color assignment and stroke history;
//! clients render whatever full state it broadcasts.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::{ServerArgs, ServerConfig};
pub use ui::run as run_server;
