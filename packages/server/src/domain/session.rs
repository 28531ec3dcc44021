//! The session aggregate: everyone connected plus the canvas they share.

use serde::{Deserialize, Serialize};

use super::{ColorPalette, ParticipantRegistry, StrokeHistory, value_object::Timestamp};

/// Represents the single drawing session of this process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub registry: ParticipantRegistry,
    pub history: StrokeHistory,
    /// Timestamp when the session was created
    pub created_at: Timestamp,
}

impl Session {
    /// Create an empty session using the curated palette
    pub fn new(created_at: Timestamp) -> Self {
        Self::with_palette(created_at, ColorPalette::curated())
    }

    /// Create an empty session with a custom palette
    pub fn with_palette(created_at: Timestamp, palette: ColorPalette) -> Self {
        Self {
            registry: ParticipantRegistry::new(palette),
            history: StrokeHistory::new(),
            created_at,
        }
    }
}
