//! Server state shared by the HTTP and WebSocket handlers.

use std::sync::Arc;

use crate::{config::ServerConfig, domain::SessionRepository, ui::coordinator::CoordinatorHandle};

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）。HTTP の読み取り専用エンドポイントが使用
    pub repository: Arc<dyn SessionRepository>,
    /// All session mutations go through the coordinator task
    pub coordinator: CoordinatorHandle,
    pub config: ServerConfig,
}
