//! UseCase: 描画中ストロークの中継状態
//!
//! stroke:start / stroke:point は履歴に入らず、そのまま他の参加者へ中継されます。
//! ここでは「誰がどのストロークを描画中か」だけを追跡し、描画途中で切断した
//! 参加者のストロークを stroke:cancel で打ち切れるようにします。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LiveStrokeRelay::start() / end() / abandon() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断時に、確定していないストロークだけが取り消し対象になることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：開始 → 確定
//! - エッジケース：同時に複数のストロークを描画中、確定済みのストロークの再確定

use std::collections::{BTreeSet, HashMap};

use crate::{domain::UserId, infrastructure::dto::websocket::StrokeCancelPayload};

/// 描画中ストロークの追跡
#[derive(Debug, Default)]
pub struct LiveStrokeRelay {
    open: HashMap<UserId, BTreeSet<String>>,
}

impl LiveStrokeRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// ストロークの描画開始を記録
    pub fn start(&mut self, user_id: &UserId, stroke_id: &str) {
        self.open
            .entry(user_id.clone())
            .or_default()
            .insert(stroke_id.to_string());
    }

    /// ストロークの確定を記録
    ///
    /// 描画中として記録されていた場合 true
    pub fn end(&mut self, user_id: &UserId, stroke_id: &str) -> bool {
        let Some(strokes) = self.open.get_mut(user_id) else {
            return false;
        };
        let removed = strokes.remove(stroke_id);
        if strokes.is_empty() {
            self.open.remove(user_id);
        }
        removed
    }

    /// 参加者の描画中ストロークをすべて破棄し、取り消し通知を返す
    pub fn abandon(&mut self, user_id: &UserId) -> Vec<StrokeCancelPayload> {
        self.open
            .remove(user_id)
            .unwrap_or_default()
            .into_iter()
            .map(|stroke_id| StrokeCancelPayload {
                stroke_id,
                user_id: user_id.as_str().to_string(),
            })
            .collect()
    }

    /// 描画中のストローク数
    pub fn open_count(&self) -> usize {
        self.open.values().map(BTreeSet::len).sum()
    }
}
