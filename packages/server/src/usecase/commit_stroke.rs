//! UseCase: ストローク確定（stroke:end）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CommitStrokeUseCase::execute() メソッド
//! - 確定ストロークの検証・送信者への帰属・履歴への追加
//!
//! ### なぜこのテストが必要か
//! - クライアントが任意の色や他人の ID を履歴に書き込めないことを保証
//! - 新しいストロークで redo バッファが無効になることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：ストローク確定
//! - 異常系：点のないストローク、未接続の参加者

use std::sync::Arc;

use crate::{
    domain::{SessionRepository, Stroke, UserId},
    infrastructure::dto::websocket::StrokeDto,
};

use super::error::CommitStrokeError;

/// ストローク確定のユースケース
pub struct CommitStrokeUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl CommitStrokeUseCase {
    /// 新しい CommitStrokeUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// ストローク確定を実行
    ///
    /// 色と所有者は送信者の登録情報で上書きされます。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Stroke>)` - 追加後の履歴（canvas:state として全員に配信する）
    /// * `Err(CommitStrokeError)` - 送信者が未登録、またはストロークが不正
    pub async fn execute(
        &self,
        user_id: &UserId,
        stroke: StrokeDto,
    ) -> Result<Vec<Stroke>, CommitStrokeError> {
        let owner = self
            .repository
            .get_participant(user_id)
            .await
            .ok_or_else(|| CommitStrokeError::ParticipantNotFound(user_id.to_string()))?;

        let stroke = stroke.into_stroke(&owner)?;
        Ok(self.repository.append_stroke(stroke).await)
    }
}
