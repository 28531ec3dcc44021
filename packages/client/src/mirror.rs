//! Local mirror of the server's stroke history.

use rakugaki_server::domain::Stroke;

/// Read-only copy of the authoritative history.
///
/// Only replaced wholesale from `user:init` and `canvas:state`; local
/// drawing never touches it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasMirror {
    strokes: Vec<Stroke>,
}

impl CanvasMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new authoritative history.
    pub fn replace(&mut self, strokes: Vec<Stroke>) {
        self.strokes = strokes;
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rakugaki_server::domain::{HexColor, Point, StrokeId, Tool, UserId};

    fn stroke(id: &str) -> Stroke {
        Stroke::new(
            StrokeId::new(id.to_string()).unwrap(),
            UserId::new("alice".to_string()).unwrap(),
            Tool::Brush,
            HexColor::new("#E53935").unwrap(),
            None,
            None,
            vec![Point::new(0.0, 0.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_replace_swaps_whole_history() {
        // テスト項目: replace で履歴全体が置き換わる（追記ではない）
        // given (前提条件):
        let mut mirror = CanvasMirror::new();
        mirror.replace(vec![stroke("a"), stroke("b")]);

        // when (操作):
        mirror.replace(vec![stroke("c")]);

        // then (期待する結果):
        assert_eq!(mirror.len(), 1);
        assert_eq!(mirror.strokes()[0].id.as_str(), "c");
    }

    #[test]
    fn test_replace_with_empty_history() {
        // テスト項目: 空の履歴で置き換えるとミラーも空になる
        let mut mirror = CanvasMirror::new();
        mirror.replace(vec![stroke("a")]);
        mirror.replace(Vec::new());
        assert!(mirror.is_empty());
    }
}
