//! Repository trait (データアクセス層の抽象化)
//!
//! ドメイン層がインターフェースを定義し、インフラ層が実装します（依存性の逆転）。
//! UseCase 層はこの trait にのみ依存します。

use async_trait::async_trait;

use super::{DisplayName, Participant, RepositoryError, Session, Stroke, Timestamp, UserId};

/// Everything a joining participant needs, read atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// The joined participant (name set, active)
    pub participant: Participant,
    /// Roster in registration order
    pub participants: Vec<Participant>,
    /// Stroke history at the moment of the join
    pub strokes: Vec<Stroke>,
}

/// Session Repository
///
/// 参加者レジストリとストローク履歴へのアクセスを抽象化します。
/// 変更系メソッドは変更後の状態をそのまま返します。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Session 全体のスナップショットを取得
    async fn get_session(&self) -> Session;

    /// 参加者を登録し、色を割り当てる
    async fn add_participant(
        &self,
        user_id: UserId,
        connected_at: Timestamp,
    ) -> Result<Participant, RepositoryError>;

    /// 表示名を設定し、参加者一覧とストローク履歴を同時に取得
    async fn join_participant(
        &self,
        user_id: &UserId,
        name: DisplayName,
    ) -> Result<SessionSnapshot, RepositoryError>;

    /// 参加者を削除
    async fn remove_participant(&self, user_id: &UserId) -> Result<Participant, RepositoryError>;

    /// 参加者を取得
    async fn get_participant(&self, user_id: &UserId) -> Option<Participant>;

    /// 参加者一覧（登録順）を取得
    async fn get_participants(&self) -> Vec<Participant>;

    /// ストロークを追加し、追加後の履歴を返す（redo バッファは空になる）
    async fn append_stroke(&self, stroke: Stroke) -> Vec<Stroke>;

    /// 最新のストロークを redo バッファへ移す。履歴が空なら None
    async fn undo(&self) -> Option<Vec<Stroke>>;

    /// redo バッファの最新を履歴へ戻す。バッファが空なら None
    async fn redo(&self) -> Option<Vec<Stroke>>;

    /// 履歴と redo バッファを空にし、空の履歴を返す
    async fn clear(&self) -> Vec<Stroke>;

    /// 現在のストローク履歴を取得
    async fn get_strokes(&self) -> Vec<Stroke>;
}
