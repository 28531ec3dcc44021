//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! プロセス内のメモリだけを使い、再起動をまたいだ永続化は行いません。
//!
//! 各メソッドは 1 回のロック取得で完結します。変更と、その結果として返す
//! スナップショットの間に他の変更が割り込むことはありません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    DisplayName, Participant, RepositoryError, Session, SessionRepository, SessionSnapshot,
    Stroke, Timestamp, UserId,
};

/// インメモリ Session Repository 実装
///
/// Session ドメインモデルを Mutex で保護して保持します。
pub struct InMemorySessionRepository {
    session: Arc<Mutex<Session>>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new(session: Arc<Mutex<Session>>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get_session(&self) -> Session {
        let session = self.session.lock().await;
        session.clone()
    }

    async fn add_participant(
        &self,
        user_id: UserId,
        connected_at: Timestamp,
    ) -> Result<Participant, RepositoryError> {
        let mut session = self.session.lock().await;
        session.registry.register(user_id, connected_at)
    }

    async fn join_participant(
        &self,
        user_id: &UserId,
        name: DisplayName,
    ) -> Result<SessionSnapshot, RepositoryError> {
        let mut session = self.session.lock().await;
        let participant = session.registry.set_name(user_id, name)?;
        Ok(SessionSnapshot {
            participant,
            participants: session.registry.list_all().to_vec(),
            strokes: session.history.snapshot().to_vec(),
        })
    }

    async fn remove_participant(&self, user_id: &UserId) -> Result<Participant, RepositoryError> {
        let mut session = self.session.lock().await;
        session.registry.unregister(user_id)
    }

    async fn get_participant(&self, user_id: &UserId) -> Option<Participant> {
        let session = self.session.lock().await;
        session.registry.get(user_id).cloned()
    }

    async fn get_participants(&self) -> Vec<Participant> {
        let session = self.session.lock().await;
        session.registry.list_all().to_vec()
    }

    async fn append_stroke(&self, stroke: Stroke) -> Vec<Stroke> {
        let mut session = self.session.lock().await;
        session.history.append(stroke);
        session.history.snapshot().to_vec()
    }

    async fn undo(&self) -> Option<Vec<Stroke>> {
        let mut session = self.session.lock().await;
        session
            .history
            .undo()
            .then(|| session.history.snapshot().to_vec())
    }

    async fn redo(&self) -> Option<Vec<Stroke>> {
        let mut session = self.session.lock().await;
        session
            .history
            .redo()
            .then(|| session.history.snapshot().to_vec())
    }

    async fn clear(&self) -> Vec<Stroke> {
        let mut session = self.session.lock().await;
        session.history.clear();
        Vec::new()
    }

    async fn get_strokes(&self) -> Vec<Stroke> {
        let session = self.session.lock().await;
        session.history.snapshot().to_vec()
    }
}
