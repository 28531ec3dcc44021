//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{ConnectionState, Participant};
use rakugaki_shared::time::timestamp_to_jst_rfc3339;

/// Session summary for `GET /api/session`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummaryDto {
    pub created_at: String, // ISO 8601
    pub participants: Vec<ParticipantDetailDto>,
    pub stroke_count: usize,
    pub redo_depth: usize,
}

/// Participant detail for the session summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDetailDto {
    pub id: String,
    pub name: Option<String>,
    pub color: String,
    pub state: ConnectionState,
    pub connected_at: String, // ISO 8601
}

impl From<&Participant> for ParticipantDetailDto {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id.as_str().to_string(),
            name: participant.name.as_ref().map(|n| n.as_str().to_string()),
            color: participant.color.as_str().to_string(),
            state: participant.state,
            connected_at: timestamp_to_jst_rfc3339(participant.connected_at.value()),
        }
    }
}
