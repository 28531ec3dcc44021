//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{debug_session_state, get_session_summary, get_strokes, health_check};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
