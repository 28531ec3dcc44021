//! Rendering seam between the session state and an output surface.

use std::io::Write;

use rakugaki_server::{
    domain::{Point, Stroke, Tool},
    infrastructure::dto::websocket::{StrokeCancelPayload, StrokeDto, StrokeStartPayload},
};

use crate::{live::LiveStroke, presence::RemoteCursor};

/// A live stroke event after it has been applied to the preview
#[derive(Debug, Clone, PartialEq)]
pub enum LiveEvent {
    Started(StrokeStartPayload),
    /// A segment from the previous point of `stroke`
    Extended {
        stroke: LiveStroke,
        from: Point,
        to: Point,
    },
    Ended(StrokeDto),
    Cancelled(StrokeCancelPayload),
}

/// Output surface for the canvas.
///
/// Live events are drawn incrementally; a full state replaces everything
/// drawn so far, live previews included.
pub trait Renderer: Send {
    fn apply_live_event(&mut self, event: &LiveEvent);

    fn render_full_state(&mut self, strokes: &[Stroke]);

    fn render_cursors(&mut self, cursors: &[RemoteCursor]);

    /// Informational line (roster changes, identity)
    fn notice(&mut self, _message: &str) {}
}

/// Prints one line per event.
pub struct TextRenderer<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!("Failed to write to renderer output: {}", e);
        }
    }
}

impl TextRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

fn describe_tool(tool: Tool, width: Option<f64>, size: Option<f64>) -> String {
    match tool {
        Tool::Brush => format!("brush w={}", width.map_or("-".to_string(), |w| w.to_string())),
        Tool::Eraser => format!("eraser s={}", size.map_or("-".to_string(), |s| s.to_string())),
    }
}

impl<W: Write + Send> Renderer for TextRenderer<W> {
    fn apply_live_event(&mut self, event: &LiveEvent) {
        let text = match event {
            LiveEvent::Started(p) => format!(
                "~ {} started {} {} at ({}, {}) by {}",
                p.stroke_id,
                describe_tool(p.tool, p.width, p.size),
                p.color.as_deref().unwrap_or("-"),
                p.point.x,
                p.point.y,
                p.user_id.as_deref().unwrap_or("?"),
            ),
            LiveEvent::Extended { stroke, from, to } => format!(
                "~ {} ({}, {}) -> ({}, {})",
                stroke.stroke_id, from.x, from.y, to.x, to.y
            ),
            LiveEvent::Ended(stroke) => {
                format!("~ {} ended with {} points", stroke.id, stroke.points.len())
            }
            LiveEvent::Cancelled(c) => format!("~ {} cancelled ({} left)", c.stroke_id, c.user_id),
        };
        self.line(&text);
    }

    fn render_full_state(&mut self, strokes: &[Stroke]) {
        self.line(&format!("= canvas: {} strokes", strokes.len()));
        for (i, stroke) in strokes.iter().enumerate() {
            let text = format!(
                "  {:>3} {} {} {} {} points by {}",
                i + 1,
                stroke.id,
                describe_tool(stroke.tool, stroke.width, stroke.size),
                stroke.color,
                stroke.points.len(),
                stroke.user_id,
            );
            self.line(&text);
        }
    }

    fn render_cursors(&mut self, cursors: &[RemoteCursor]) {
        let parts: Vec<String> = cursors
            .iter()
            .map(|c| format!("{}@({}, {}) {}", c.name, c.x, c.y, c.color))
            .collect();
        self.line(&format!("@ {}", parts.join("  ")));
    }

    fn notice(&mut self, message: &str) {
        self.line(&format!("* {message}"));
    }
}
