//! Turns a tool selection and a pointer path into the messages a drawing
//! gesture produces on the wire.

use rakugaki_server::{
    domain::{DEFAULT_ERASER_SIZE, Point, Tool},
    infrastructure::dto::websocket::{
        ClientMessage, StrokeDto, StrokePointPayload, StrokeStartPayload,
    },
};

use crate::{error::ClientError, session::Identity};

pub const DEFAULT_BRUSH_WIDTH: f64 = 4.0;

/// Current tool selection of the local user
#[derive(Debug, Clone, PartialEq)]
pub struct GestureBuilder {
    pub tool: Tool,
    pub width: f64,
    pub size: f64,
}

impl Default for GestureBuilder {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            width: DEFAULT_BRUSH_WIDTH,
            size: DEFAULT_ERASER_SIZE,
        }
    }
}

impl GestureBuilder {
    /// Build `stroke:start`, one `stroke:point` per further point, then `stroke:end`.
    ///
    /// Drawing requires the identity from `user:init`; the declared color is
    /// the server-assigned one.
    pub fn build(
        &self,
        identity: Option<&Identity>,
        path: &[Point],
    ) -> Result<Vec<ClientMessage>, ClientError> {
        let identity = identity.ok_or(ClientError::NotJoined)?;
        let (first, rest) = path.split_first().ok_or(ClientError::EmptyPath)?;

        let stroke_id = uuid::Uuid::new_v4().to_string();
        let size = (self.tool == Tool::Eraser).then_some(self.size);
        let width = Some(self.width);

        let mut messages = Vec::with_capacity(path.len() + 1);
        messages.push(ClientMessage::StrokeStart(StrokeStartPayload {
            stroke_id: stroke_id.clone(),
            color: Some(identity.color.clone()),
            width,
            tool: self.tool,
            user_id: Some(identity.user_id.clone()),
            size,
            point: *first,
        }));
        messages.extend(rest.iter().map(|point| {
            ClientMessage::StrokePoint(StrokePointPayload {
                stroke_id: stroke_id.clone(),
                point: *point,
            })
        }));
        messages.push(ClientMessage::StrokeEnd {
            stroke: StrokeDto {
                id: stroke_id,
                user_id: Some(identity.user_id.clone()),
                tool: self.tool,
                color: Some(identity.color.clone()),
                width,
                size,
                points: path.to_vec(),
            },
        });
        Ok(messages)
    }
}

/// Upper bound on the points generated for one straight line
pub const MAX_LINE_POINTS: usize = 1024;

/// Points from `from` to `to`, spaced at most `step` apart, both ends included.
///
/// Long lines get coarser spacing so the path never exceeds
/// [`MAX_LINE_POINTS`].
pub fn line_path(from: Point, to: Point, step: f64) -> Vec<Point> {
    let distance = (to.x - from.x).hypot(to.y - from.y);
    if step.is_nan() || step <= 0.0 || distance == 0.0 || !distance.is_finite() {
        return vec![from, to];
    }
    let segments = (distance / step)
        .ceil()
        .clamp(1.0, (MAX_LINE_POINTS - 1) as f64) as usize;
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
        })
        .collect()
}
