//! Core domain models for the shared canvas.

use serde::{Deserialize, Serialize};

use super::{
    error::StrokeError,
    value_object::{DisplayName, HexColor, Point, StrokeId, Timestamp, Tool, UserId},
};

/// Eraser size used when a stroke does not carry one.
pub const DEFAULT_ERASER_SIZE: f64 = 20.0;

/// Lifecycle of a participant's connection.
///
/// `Closed` has no variant: a closed connection is removed from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// Connected, no `user:join` processed yet
    #[default]
    Unidentified,
    /// Joined and received the session snapshot
    Active,
}

/// Represents a connected participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Server-generated identity, unique while connected
    pub id: UserId,
    /// Display name, set on join
    pub name: Option<DisplayName>,
    /// Color assigned from the palette
    pub color: HexColor,
    /// Timestamp when the participant connected
    pub connected_at: Timestamp,
    pub state: ConnectionState,
}

impl Participant {
    /// Create a new, not yet joined participant
    pub fn new(id: UserId, color: HexColor, connected_at: Timestamp) -> Self {
        Self {
            id,
            name: None,
            color,
            connected_at,
            state: ConnectionState::Unidentified,
        }
    }

    /// Record the join request: set the name and become active.
    ///
    /// A second join while active only renames.
    pub fn join(&mut self, name: DisplayName) {
        self.name = Some(name);
        self.state = ConnectionState::Active;
    }

    pub fn is_active(&self) -> bool {
        self.state == ConnectionState::Active
    }

    /// Name shown to others, empty before join.
    pub fn display_name(&self) -> &str {
        self.name.as_ref().map_or("", DisplayName::as_str)
    }
}

/// A completed stroke, immutable once it is part of the history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub id: StrokeId,
    /// Owning participant
    pub user_id: UserId,
    pub tool: Tool,
    pub color: HexColor,
    /// Line width (brush)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Eraser size (eraser)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    pub points: Vec<Point>,
}

impl Stroke {
    /// Create a validated stroke.
    ///
    /// # Errors
    ///
    /// * `StrokeError::NoPoints` - `points` is empty
    /// * `StrokeError::NonFinitePoint` - a coordinate is NaN or infinite
    /// * `StrokeError::InvalidDimension` - `width` or `size` is not a positive finite number
    pub fn new(
        id: StrokeId,
        user_id: UserId,
        tool: Tool,
        color: HexColor,
        width: Option<f64>,
        size: Option<f64>,
        points: Vec<Point>,
    ) -> Result<Self, StrokeError> {
        if points.is_empty() {
            return Err(StrokeError::NoPoints);
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(StrokeError::NonFinitePoint { index });
        }
        for (field, value) in [("width", width), ("size", size)] {
            if let Some(v) = value
                && !(v.is_finite() && v > 0.0)
            {
                return Err(StrokeError::InvalidDimension { field });
            }
        }

        Ok(Self {
            id,
            user_id,
            tool,
            color,
            width,
            size,
            points,
        })
    }

    /// Eraser size, defaulting to [`DEFAULT_ERASER_SIZE`].
    pub fn eraser_size(&self) -> f64 {
        self.size.unwrap_or(DEFAULT_ERASER_SIZE)
    }

    /// Re-attribute the stroke to its sender: owner identity and registry color.
    pub fn attributed_to(mut self, participant: &Participant) -> Self {
        self.user_id = participant.id.clone();
        self.color = participant.color.clone();
        self
    }
}
