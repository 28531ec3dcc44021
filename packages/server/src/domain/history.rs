//! Stroke history with a global, linear undo/redo.

use serde::{Deserialize, Serialize};

use super::Stroke;

/// The authoritative canvas: completed strokes plus the redo buffer.
///
/// Both sequences are stacks touched only at their end. Any change other
/// than undo/redo empties the redo buffer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeHistory {
    strokes: Vec<Stroke>,
    redo: Vec<Stroke>,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed stroke. Clears the redo buffer.
    pub fn append(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
        self.redo.clear();
    }

    /// Move the most recent stroke, whoever drew it, to the redo buffer.
    ///
    /// Returns `false` (and changes nothing) when the history is empty.
    pub fn undo(&mut self) -> bool {
        match self.strokes.pop() {
            Some(stroke) => {
                self.redo.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Move the most recently undone stroke back onto the history.
    ///
    /// Returns `false` (and changes nothing) when the redo buffer is empty.
    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(stroke) => {
                self.strokes.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Empty both the history and the redo buffer.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.redo.clear();
    }

    /// The current history, oldest first.
    pub fn snapshot(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Undone strokes, most recently undone last.
    pub fn redo_buffer(&self) -> &[Stroke] {
        &self.redo
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
