//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層（セッションコーディネーター）から呼び出され、Domain 層を操作します。

pub mod commit_stroke;
pub mod connect_participant;
pub mod disconnect_participant;
pub mod edit_history;
pub mod error;
pub mod join_session;
pub mod move_cursor;
pub mod relay_stroke;

pub use commit_stroke::CommitStrokeUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use edit_history::EditHistoryUseCase;
pub use error::{CommitStrokeError, ConnectError, DisconnectError, JoinError};
pub use join_session::{JoinOutcome, JoinSessionUseCase};
pub use move_cursor::MoveCursorUseCase;
pub use relay_stroke::LiveStrokeRelay;
