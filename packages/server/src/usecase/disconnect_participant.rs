//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 参加者の削除と、残りの参加者への roster 構築
//!
//! ### なぜこのテストが必要か
//! - 切断した参加者の色が解放され、roster から消えることを確認
//! - ストローク履歴には影響しないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断
//! - エッジケース：最後の参加者の切断
//! - 異常系：存在しない参加者の切断試行

use std::sync::Arc;

use crate::{
    domain::{Participant, SessionRepository, UserId},
    infrastructure::dto::websocket::ParticipantInfo,
};

use super::error::DisconnectError;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok((Participant, Vec<ParticipantInfo>))` - 削除された参加者と残りの roster
    /// * `Err(DisconnectError)` - 参加者が登録されていない
    pub async fn execute(
        &self,
        user_id: &UserId,
    ) -> Result<(Participant, Vec<ParticipantInfo>), DisconnectError> {
        let removed = self.repository.remove_participant(user_id).await?;
        let roster = self
            .repository
            .get_participants()
            .await
            .iter()
            .map(ParticipantInfo::from)
            .collect();
        Ok((removed, roster))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{HexColor, Point, Session, Stroke, StrokeId, Timestamp, Tool, UserIdFactory},
        infrastructure::repository::InMemorySessionRepository,
    };
    use tokio::sync::Mutex;

    fn create_test_repository() -> Arc<InMemorySessionRepository> {
        let session = Arc::new(Mutex::new(Session::new(Timestamp::new(0))));
        Arc::new(InMemorySessionRepository::new(session))
    }

    async fn connect(repository: &InMemorySessionRepository) -> UserId {
        let user_id = UserIdFactory::generate();
        repository
            .add_participant(user_id.clone(), Timestamp::new(0))
            .await
            .unwrap();
        user_id
    }

    #[tokio::test]
    async fn test_disconnect_participant_success() {
        // テスト項目: 参加者が切断でき、残りの roster が返される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = DisconnectParticipantUseCase::new(repository.clone());
        let alice = connect(&repository).await;
        let bob = connect(&repository).await;
        let charlie = connect(&repository).await;

        // when (操作): alice を切断
        let result = usecase.execute(&alice).await;

        // then (期待する結果):
        let (removed, roster) = result.unwrap();
        assert_eq!(removed.id, alice);
        let ids: Vec<&str> = roster.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec![bob.as_str(), charlie.as_str()]);
        assert_eq!(repository.get_participants().await.len(), 2);
    }

    #[tokio::test]
    async fn test_disconnect_last_participant() {
        // テスト項目: 最後の参加者が切断すると roster は空
        let repository = create_test_repository();
        let usecase = DisconnectParticipantUseCase::new(repository.clone());
        let alice = connect(&repository).await;

        let (_, roster) = usecase.execute(&alice).await.unwrap();

        assert!(roster.is_empty());
        assert!(repository.get_participants().await.is_empty());
    }

    #[tokio::test]
    async fn test_disconnect_keeps_history() {
        // テスト項目: 切断してもその参加者のストロークは履歴に残る
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = DisconnectParticipantUseCase::new(repository.clone());
        let alice = connect(&repository).await;
        let stroke = Stroke::new(
            StrokeId::new("s1".to_string()).unwrap(),
            alice.clone(),
            Tool::Brush,
            HexColor::new("#E53935").unwrap(),
            None,
            None,
            vec![Point::new(0.0, 0.0)],
        )
        .unwrap();
        repository.append_stroke(stroke).await;

        // when (操作):
        usecase.execute(&alice).await.unwrap();

        // then (期待する結果):
        assert_eq!(repository.get_strokes().await.len(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_nonexistent_participant() {
        // テスト項目: 存在しない参加者の切断試行がエラーになる
        let repository = create_test_repository();
        let usecase = DisconnectParticipantUseCase::new(repository.clone());
        let ghost = UserIdFactory::generate();

        let result = usecase.execute(&ghost).await;

        assert_eq!(
            result.unwrap_err(),
            DisconnectError::ParticipantNotFound(ghost.as_str().to_string())
        );
    }
}
