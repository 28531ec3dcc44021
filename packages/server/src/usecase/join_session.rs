//! UseCase: 参加要求（user:join）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinSessionUseCase::execute() / is_joined() メソッド
//! - 表示名の正規化と、参加者への初期スナップショット（user:init）の構築
//!
//! ### なぜこのテストが必要か
//! - user:init の strokes が参加時点の履歴と一致することを保証
//! - 表示名の切り詰め・既定値を確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加、既存ストロークのある状態での参加
//! - エッジケース：空の名前、再参加
//! - 異常系：未接続の参加者

use std::sync::Arc;

use crate::{
    domain::{DisplayName, SessionRepository, UserId},
    infrastructure::dto::websocket::{ParticipantInfo, UserInitPayload},
};

use super::error::JoinError;

/// 参加要求の結果
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    /// 参加者本人にのみ送る初期スナップショット
    pub init: UserInitPayload,
    /// 全員に配信する参加者一覧
    pub roster: Vec<ParticipantInfo>,
}

/// 参加要求のユースケース
pub struct JoinSessionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl JoinSessionUseCase {
    /// 新しい JoinSessionUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 参加要求を実行
    ///
    /// # Arguments
    ///
    /// * `user_id` - 接続から特定された参加者 ID
    /// * `raw_name` - クライアントが送った表示名（未加工）
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - user:init と roster
    /// * `Err(JoinError)` - 参加者が登録されていない
    pub async fn execute(
        &self,
        user_id: &UserId,
        raw_name: Option<&str>,
    ) -> Result<JoinOutcome, JoinError> {
        let name = DisplayName::from_raw(raw_name);
        let snapshot = self.repository.join_participant(user_id, name).await?;

        let roster: Vec<ParticipantInfo> = snapshot
            .participants
            .iter()
            .map(ParticipantInfo::from)
            .collect();

        let init = UserInitPayload {
            user_id: snapshot.participant.id.as_str().to_string(),
            name: snapshot.participant.display_name().to_string(),
            color: snapshot.participant.color.as_str().to_string(),
            users: roster.clone(),
            strokes: snapshot.strokes,
        };

        Ok(JoinOutcome { init, roster })
    }

    /// 参加者が user:join 済み（active）かどうか
    ///
    /// 接続状態はレジストリの Participant だけが保持する
    pub async fn is_joined(&self, user_id: &UserId) -> bool {
        self.repository
            .get_participant(user_id)
            .await
            .is_some_and(|p| p.is_active())
    }
}
