//! UseCase: カーソル位置（cursor:move）の中継
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - MoveCursorUseCase::execute() メソッド
//! - 送信者の名前と色を付加したカーソル通知の構築
//!
//! ### なぜこのテストが必要か
//! - クライアントが申告した userId ではなく接続の ID が使われることを保証
//! - 登録されていない送信者のカーソルは中継されないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みの参加者のカーソル
//! - エッジケース：参加前（名前なし）の参加者、なりすまし
//! - 異常系：未登録の参加者、座標が有限でない

use std::sync::Arc;

use crate::{
    domain::{SessionRepository, UserId},
    infrastructure::dto::websocket::{CursorMoveRequest, CursorPayload},
};

/// カーソル中継のユースケース
pub struct MoveCursorUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl MoveCursorUseCase {
    /// 新しい MoveCursorUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// カーソル通知を構築
    ///
    /// # Returns
    ///
    /// * `Some(CursorPayload)` - 送信者を含む全員に配信する通知
    /// * `None` - 送信者が未登録、または座標が不正
    pub async fn execute(
        &self,
        user_id: &UserId,
        request: CursorMoveRequest,
    ) -> Option<CursorPayload> {
        if !(request.x.is_finite() && request.y.is_finite()) {
            return None;
        }
        let participant = self.repository.get_participant(user_id).await?;

        Some(CursorPayload {
            user_id: participant.id.as_str().to_string(),
            name: participant.display_name().to_string(),
            x: request.x,
            y: request.y,
            color: participant.color.as_str().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        DisplayName, HexColor, MockSessionRepository, Participant, Timestamp,
    };
    use mockall::predicate::eq;

    fn alice() -> Participant {
        let mut participant = Participant::new(
            UserId::new("alice".to_string()).unwrap(),
            HexColor::new("#E53935").unwrap(),
            Timestamp::new(0),
        );
        participant.join(DisplayName::from_raw(Some("Alice")));
        participant
    }

    fn request(user_id: Option<&str>, x: f64, y: f64) -> CursorMoveRequest {
        CursorMoveRequest {
            user_id: user_id.map(str::to_string),
            x,
            y,
        }
    }

    #[tokio::test]
    async fn test_cursor_is_enriched_with_name_and_color() {
        // テスト項目: カーソル通知に送信者の名前と色が付加される
        // given (前提条件):
        let mut mock = MockSessionRepository::new();
        mock.expect_get_participant()
            .with(eq(alice().id))
            .times(1)
            .returning(|_| Some(alice()));
        let usecase = MoveCursorUseCase::new(Arc::new(mock));

        // when (操作):
        let payload = usecase
            .execute(&alice().id, request(None, 12.5, 40.0))
            .await;

        // then (期待する結果):
        assert_eq!(
            payload,
            Some(CursorPayload {
                user_id: "alice".to_string(),
                name: "Alice".to_string(),
                x: 12.5,
                y: 40.0,
                color: "#E53935".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_declared_user_id_is_ignored() {
        // テスト項目: なりすました userId ではなく接続の ID で通知される
        let mut mock = MockSessionRepository::new();
        mock.expect_get_participant()
            .with(eq(alice().id))
            .returning(|_| Some(alice()));
        let usecase = MoveCursorUseCase::new(Arc::new(mock));

        let payload = usecase
            .execute(&alice().id, request(Some("bob"), 1.0, 2.0))
            .await
            .unwrap();

        assert_eq!(payload.user_id, "alice");
    }

    #[tokio::test]
    async fn test_cursor_before_join_has_empty_name() {
        // テスト項目: 参加前の参加者のカーソルは名前が空
        let mut mock = MockSessionRepository::new();
        mock.expect_get_participant().returning(|id| {
            Some(Participant::new(
                id.clone(),
                HexColor::new("#1E88E5").unwrap(),
                Timestamp::new(0),
            ))
        });
        let usecase = MoveCursorUseCase::new(Arc::new(mock));
        let user_id = UserId::new("u1".to_string()).unwrap();

        let payload = usecase.execute(&user_id, request(None, 0.0, 0.0)).await.unwrap();

        assert_eq!(payload.name, "");
        assert_eq!(payload.color, "#1E88E5");
    }

    #[tokio::test]
    async fn test_unknown_sender_is_not_relayed() {
        // テスト項目: 未登録の参加者のカーソルは中継されない
        let mut mock = MockSessionRepository::new();
        mock.expect_get_participant().returning(|_| None);
        let usecase = MoveCursorUseCase::new(Arc::new(mock));
        let ghost = UserId::new("ghost".to_string()).unwrap();

        assert_eq!(usecase.execute(&ghost, request(None, 1.0, 1.0)).await, None);
    }

    #[tokio::test]
    async fn test_non_finite_coordinates_are_dropped() {
        // テスト項目: 有限でない座標はリポジトリを参照せずに破棄される
        let mut mock = MockSessionRepository::new();
        mock.expect_get_participant().never();
        let usecase = MoveCursorUseCase::new(Arc::new(mock));

        assert_eq!(
            usecase
                .execute(&alice().id, request(None, f64::INFINITY, 1.0))
                .await,
            None
        );
    }
}
