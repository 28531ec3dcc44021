//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 接続時の ID 発行と色の割り当て、参加者一覧（roster）の構築
//!
//! ### なぜこのテストが必要か
//! - 同時接続中の参加者が互いに見分けられる色を持つことを保証
//! - roster が登録順で構築されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続
//! - エッジケース：パレット数を超える接続（色の巡回割り当て）

use std::sync::Arc;

use rakugaki_shared::time::get_jst_timestamp;

use crate::{
    domain::{Participant, SessionRepository, Timestamp, UserIdFactory},
    infrastructure::dto::websocket::ParticipantInfo,
};

use super::error::ConnectError;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 参加者接続を実行
    ///
    /// サーバー側で ID を発行し、パレットから色を割り当てます。
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 登録された参加者（未識別状態）
    /// * `Err(ConnectError)` - 登録失敗
    pub async fn execute(&self) -> Result<Participant, ConnectError> {
        let user_id = UserIdFactory::generate();
        let connected_at = Timestamp::new(get_jst_timestamp());
        let participant = self
            .repository
            .add_participant(user_id, connected_at)
            .await?;
        Ok(participant)
    }

    /// 参加者一覧（roster）を構築
    ///
    /// # Returns
    ///
    /// 接続中の参加者のリスト（登録順）
    pub async fn build_roster(&self) -> Vec<ParticipantInfo> {
        self.repository
            .get_participants()
            .await
            .iter()
            .map(ParticipantInfo::from)
            .collect()
    }
}
