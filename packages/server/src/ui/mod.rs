//! UI 層（プレゼンテーション層）
//!
//! HTTP / WebSocket のエンドポイントと、セッションを変更する唯一の経路である
//! セッションコーディネーターを提供します。

pub mod coordinator;
mod handler;
mod runner;
mod signal;
pub mod state;

pub use coordinator::{CoordinatorHandle, SessionCoordinator};
pub use runner::{build_app, build_state, run, serve};
