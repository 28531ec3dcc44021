//! WebSocket message DTOs for the shared canvas.
//!
//! Every frame is a JSON object with a `type` discriminator such as
//! `"stroke:start"`. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::lenient;
use crate::domain::{HexColor, Participant, Point, Stroke, StrokeError, StrokeId, Tool};

/// Message type discriminators
pub mod message_type {
    pub const USER_JOIN: &str = "user:join";
    pub const USER_INIT: &str = "user:init";
    pub const USERS_UPDATE: &str = "users:update";
    pub const CANVAS_STATE: &str = "canvas:state";
    pub const STROKE_START: &str = "stroke:start";
    pub const STROKE_POINT: &str = "stroke:point";
    pub const STROKE_END: &str = "stroke:end";
    pub const STROKE_CANCEL: &str = "stroke:cancel";
    pub const UNDO_REQUEST: &str = "undo:request";
    pub const REDO_REQUEST: &str = "redo:request";
    pub const CANVAS_CLEAR: &str = "canvas:clear";
    pub const CURSOR_MOVE: &str = "cursor:move";
}

/// Types a client may send.
pub const CLIENT_MESSAGE_TYPES: [&str; 8] = [
    message_type::USER_JOIN,
    message_type::STROKE_START,
    message_type::STROKE_POINT,
    message_type::STROKE_END,
    message_type::UNDO_REQUEST,
    message_type::REDO_REQUEST,
    message_type::CANVAS_CLEAR,
    message_type::CURSOR_MOVE,
];

/// Client → server messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "user:join")]
    UserJoin {
        #[serde(default)]
        name: Option<String>,
    },
    #[serde(rename = "stroke:start")]
    StrokeStart(StrokeStartPayload),
    #[serde(rename = "stroke:point")]
    StrokePoint(StrokePointPayload),
    #[serde(rename = "stroke:end")]
    StrokeEnd { stroke: StrokeDto },
    #[serde(rename = "undo:request")]
    UndoRequest,
    #[serde(rename = "redo:request")]
    RedoRequest,
    #[serde(rename = "canvas:clear")]
    CanvasClear,
    #[serde(rename = "cursor:move")]
    CursorMove(CursorMoveRequest),
}

impl ClientMessage {
    /// The `type` discriminator of this message.
    pub fn message_type(&self) -> &'static str {
        match self {
            ClientMessage::UserJoin { .. } => message_type::USER_JOIN,
            ClientMessage::StrokeStart(_) => message_type::STROKE_START,
            ClientMessage::StrokePoint(_) => message_type::STROKE_POINT,
            ClientMessage::StrokeEnd { .. } => message_type::STROKE_END,
            ClientMessage::UndoRequest => message_type::UNDO_REQUEST,
            ClientMessage::RedoRequest => message_type::REDO_REQUEST,
            ClientMessage::CanvasClear => message_type::CANVAS_CLEAR,
            ClientMessage::CursorMove(_) => message_type::CURSOR_MOVE,
        }
    }

    /// Whether the message draws on, edits, or points at the canvas.
    pub fn is_drawing(&self) -> bool {
        !matches!(self, ClientMessage::UserJoin { .. })
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Server → client messages
///
/// `stroke:start`, `stroke:point` and `stroke:end` are relayed verbatim from
/// the drawing client; the variants exist so receivers can decode them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "user:init")]
    UserInit(UserInitPayload),
    #[serde(rename = "users:update")]
    UsersUpdate { users: Vec<ParticipantInfo> },
    #[serde(rename = "canvas:state")]
    CanvasState { strokes: Vec<Stroke> },
    #[serde(rename = "cursor:move")]
    CursorMove(CursorPayload),
    #[serde(rename = "stroke:start")]
    StrokeStart(StrokeStartPayload),
    #[serde(rename = "stroke:point")]
    StrokePoint(StrokePointPayload),
    #[serde(rename = "stroke:end")]
    StrokeEnd { stroke: StrokeDto },
    #[serde(rename = "stroke:cancel")]
    StrokeCancel(StrokeCancelPayload),
}

impl ServerMessage {
    pub fn message_type(&self) -> &'static str {
        match self {
            ServerMessage::UserInit(_) => message_type::USER_INIT,
            ServerMessage::UsersUpdate { .. } => message_type::USERS_UPDATE,
            ServerMessage::CanvasState { .. } => message_type::CANVAS_STATE,
            ServerMessage::CursorMove(_) => message_type::CURSOR_MOVE,
            ServerMessage::StrokeStart(_) => message_type::STROKE_START,
            ServerMessage::StrokePoint(_) => message_type::STROKE_POINT,
            ServerMessage::StrokeEnd { .. } => message_type::STROKE_END,
            ServerMessage::StrokeCancel(_) => message_type::STROKE_CANCEL,
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub id: String,
    pub color: String,
    /// Absent until the participant has joined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<&Participant> for ParticipantInfo {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id.as_str().to_string(),
            color: participant.color.as_str().to_string(),
            name: participant.name.as_ref().map(|n| n.as_str().to_string()),
        }
    }
}

/// Snapshot sent to a participant right after it joins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInitPayload {
    pub user_id: String,
    pub name: String,
    pub color: String,
    pub users: Vec<ParticipantInfo>,
    pub strokes: Vec<Stroke>,
}

/// First fragment of an in-progress stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStartPayload {
    pub stroke_id: String,
    /// Client-declared color, shown as-is in the live preview
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::option_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<f64>,
    #[serde(default)]
    pub tool: Tool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::option_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<f64>,
    pub point: Point,
}

/// Further point of an in-progress stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokePointPayload {
    pub stroke_id: String,
    pub point: Point,
}

/// A live stroke abandoned because its author disconnected mid-gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeCancelPayload {
    pub stroke_id: String,
    pub user_id: String,
}

/// Completed stroke as declared by the drawing client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeDto {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub tool: Tool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::option_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::option_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<f64>,
    pub points: Vec<Point>,
}

impl StrokeDto {
    /// Convert into a history entry owned by `owner`.
    ///
    /// The declared owner and color are discarded: the stroke is attributed
    /// to the sending participant and takes its registry color.
    pub fn into_stroke(self, owner: &Participant) -> Result<Stroke, StrokeError> {
        let fallback_color = self
            .color
            .as_deref()
            .and_then(|c| HexColor::new(c).ok())
            .unwrap_or_else(|| owner.color.clone());
        let stroke = Stroke::new(
            StrokeId::new(self.id)?,
            owner.id.clone(),
            self.tool,
            fallback_color,
            self.width,
            self.size,
            self.points,
        )?;
        Ok(stroke.attributed_to(owner))
    }
}

impl From<&Stroke> for StrokeDto {
    fn from(stroke: &Stroke) -> Self {
        Self {
            id: stroke.id.as_str().to_string(),
            user_id: Some(stroke.user_id.as_str().to_string()),
            tool: stroke.tool,
            color: Some(stroke.color.as_str().to_string()),
            width: stroke.width,
            size: stroke.size,
            points: stroke.points.clone(),
        }
    }
}

/// Cursor position reported by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorMoveRequest {
    /// Ignored by the server; the connection's identity is used instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub x: f64,
    pub y: f64,
}

/// Cursor position enriched with the sender's name and color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPayload {
    pub user_id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub color: String,
}

/// Why an inbound frame was dropped
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("message has no type discriminator")]
    MissingType,

    #[error("unknown message type: {0}")]
    UnknownType(String),

    #[error("malformed {message_type} message: {source}")]
    Malformed {
        message_type: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Decode one inbound text frame.
///
/// Unknown types are reported separately from malformed known ones so the
/// caller can ignore the former quietly.
pub fn decode_client_message(text: &str) -> Result<ClientMessage, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(DecodeError::InvalidJson)?;
    let message_type = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .ok_or(DecodeError::MissingType)?
        .to_string();

    if !CLIENT_MESSAGE_TYPES.contains(&message_type.as_str()) {
        return Err(DecodeError::UnknownType(message_type));
    }

    serde_json::from_value(value).map_err(|source| DecodeError::Malformed {
        message_type,
        source,
    })
}
