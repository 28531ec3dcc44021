//! Live preview of strokes other participants are drawing right now.

use std::collections::HashMap;

use rakugaki_server::{
    domain::{DEFAULT_ERASER_SIZE, Point, Tool},
    infrastructure::dto::websocket::{StrokePointPayload, StrokeStartPayload},
};

/// An in-progress remote stroke
#[derive(Debug, Clone, PartialEq)]
pub struct LiveStroke {
    pub stroke_id: String,
    pub user_id: Option<String>,
    /// Color declared by the drawing client, shown as-is
    pub color: Option<String>,
    pub tool: Tool,
    pub width: Option<f64>,
    pub size: Option<f64>,
    pub points: Vec<Point>,
}

impl LiveStroke {
    /// Most recent point, the segment origin for the next `stroke:point`.
    pub fn last_point(&self) -> Option<&Point> {
        self.points.last()
    }

    pub fn eraser_size(&self) -> f64 {
        self.size.unwrap_or(DEFAULT_ERASER_SIZE)
    }
}

/// Remote strokes keyed by stroke id.
///
/// Entries are never written to the mirror: the stroke only becomes part
/// of the canvas once the server broadcasts it in `canvas:state`.
#[derive(Debug, Default)]
pub struct LivePreview {
    strokes: HashMap<String, LiveStroke>,
}

impl LivePreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, payload: &StrokeStartPayload) {
        self.strokes.insert(
            payload.stroke_id.clone(),
            LiveStroke {
                stroke_id: payload.stroke_id.clone(),
                user_id: payload.user_id.clone(),
                color: payload.color.clone(),
                tool: payload.tool,
                width: payload.width,
                size: payload.size,
                points: vec![payload.point],
            },
        );
    }

    /// Extend an open stroke. Points for unknown ids are ignored.
    ///
    /// Returns the segment origin when the point was applied.
    pub fn point(&mut self, payload: &StrokePointPayload) -> Option<Point> {
        let stroke = self.strokes.get_mut(&payload.stroke_id)?;
        let from = stroke.last_point().copied()?;
        stroke.points.push(payload.point);
        Some(from)
    }

    /// Close a stroke because it was completed or cancelled.
    pub fn finish(&mut self, stroke_id: &str) -> Option<LiveStroke> {
        self.strokes.remove(stroke_id)
    }

    pub fn get(&self, stroke_id: &str) -> Option<&LiveStroke> {
        self.strokes.get(stroke_id)
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
