//! UseCase: 履歴編集（undo / redo / clear）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - EditHistoryUseCase::undo() / redo() / clear() メソッド
//!
//! ### なぜこのテストが必要か
//! - undo はセッション全体で共有され、誰のストロークでも最新のものを取り消すことを保証
//! - 変化がない操作（空の undo / redo）では配信が行われないよう None を返すことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：undo → redo で元に戻る
//! - エッジケース：空の履歴での undo、空のバッファでの redo
//! - clear 後は redo できない

use std::sync::Arc;

use crate::domain::{SessionRepository, Stroke};

/// 履歴編集のユースケース
pub struct EditHistoryUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl EditHistoryUseCase {
    /// 新しい EditHistoryUseCase を作成
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 最新のストロークを取り消す
    ///
    /// # Returns
    ///
    /// * `Some(Vec<Stroke>)` - 取り消し後の履歴
    /// * `None` - 履歴が空で何も変わらなかった
    pub async fn undo(&self) -> Option<Vec<Stroke>> {
        self.repository.undo().await
    }

    /// 直前に取り消したストロークを戻す
    ///
    /// # Returns
    ///
    /// * `Some(Vec<Stroke>)` - やり直し後の履歴
    /// * `None` - redo バッファが空で何も変わらなかった
    pub async fn redo(&self) -> Option<Vec<Stroke>> {
        self.repository.redo().await
    }

    /// キャンバスを消去する
    ///
    /// 空の履歴でも常に変更として扱い、空の履歴を返します。
    pub async fn clear(&self) -> Vec<Stroke> {
        self.repository.clear().await
    }
}
