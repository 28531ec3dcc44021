//! Identity & presence registry.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{
    Participant,
    error::RepositoryError,
    palette::ColorPalette,
    value_object::{DisplayName, HexColor, Timestamp, UserId},
};

/// Connected participants in registration order, plus the palette their
/// colors come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticipantRegistry {
    participants: Vec<Participant>,
    #[serde(skip)]
    palette: ColorPalette,
}

impl ParticipantRegistry {
    pub fn new(palette: ColorPalette) -> Self {
        Self {
            participants: Vec::new(),
            palette,
        }
    }

    /// Register a new connection and assign it a color.
    ///
    /// # Errors
    ///
    /// `RepositoryError::DuplicateParticipant` if `id` is already registered.
    pub fn register(
        &mut self,
        id: UserId,
        connected_at: Timestamp,
    ) -> Result<Participant, RepositoryError> {
        if self.get(&id).is_some() {
            return Err(RepositoryError::DuplicateParticipant(id.into_string()));
        }

        let in_use: HashSet<&HexColor> = self.participants.iter().map(|p| &p.color).collect();
        let color = self.palette.pick(&in_use, self.participants.len());
        let participant = Participant::new(id, color, connected_at);
        self.participants.push(participant.clone());
        Ok(participant)
    }

    /// Set the display name of a participant and mark it active.
    pub fn set_name(
        &mut self,
        id: &UserId,
        name: DisplayName,
    ) -> Result<Participant, RepositoryError> {
        let participant = self
            .participants
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| RepositoryError::ParticipantNotFound(id.to_string()))?;
        participant.join(name);
        Ok(participant.clone())
    }

    /// Remove a participant, freeing its color.
    pub fn unregister(&mut self, id: &UserId) -> Result<Participant, RepositoryError> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| RepositoryError::ParticipantNotFound(id.to_string()))?;
        Ok(self.participants.remove(index))
    }

    pub fn get(&self, id: &UserId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    /// All participants in registration order.
    pub fn list_all(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }
}
