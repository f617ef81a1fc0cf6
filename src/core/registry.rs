//! Participant roster and per-participant keystroke counters.

use super::participant::{Participant, ParticipantId};
use crate::config::READINESS_THRESHOLD;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors raised by registry lookups
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    #[error("Participant {0} is not in the registry")]
    NotFound(ParticipantId),
}

/// Ordered, grow-only roster.
///
/// Join order is preserved exactly and drives roster display. Participants
/// are never removed so typing data stays comparable for the whole session.
#[derive(Clone, Debug)]
pub struct Registry {
    participants: HashMap<ParticipantId, Participant>,
    order: Vec<ParticipantId>,
    threshold: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Empty registry using [`READINESS_THRESHOLD`].
    pub fn new() -> Self {
        Self::with_threshold(READINESS_THRESHOLD)
    }

    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            participants: HashMap::new(),
            order: Vec::new(),
            threshold,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn add_participant(&mut self) -> ParticipantId {
        let id = ParticipantId::new();
        self.participants.insert(id, Participant::new(id));
        self.order.push(id);
        debug!(participant = %id, roster_size = self.order.len(), "Participant joined");
        id
    }

    pub fn rename_participant(&mut self, id: ParticipantId, name: String) -> Result<(), RegistryError> {
        let participant = self.get_mut(id)?;
        participant.rename(name);
        debug!(participant = %id, "Participant renamed");
        Ok(())
    }

    pub fn record_keystroke(&mut self, id: ParticipantId) -> Result<u32, RegistryError> {
        let participant = self.get_mut(id)?;
        participant.record_keystroke();
        Ok(participant.chars_typed())
    }

    pub fn get(&self, id: ParticipantId) -> Result<&Participant, RegistryError> {
        self.participants.get(&id).ok_or(RegistryError::NotFound(id))
    }

    fn get_mut(&mut self, id: ParticipantId) -> Result<&mut Participant, RegistryError> {
        self.participants
            .get_mut(&id)
            .ok_or(RegistryError::NotFound(id))
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.participants.contains_key(&id)
    }

    /// True once the participant has typed at least the readiness threshold.
    pub fn has_enough_data(&self, id: ParticipantId) -> Result<bool, RegistryError> {
        Ok(self.get(id)?.chars_typed() >= self.threshold)
    }

    pub fn all_have_enough_data(&self) -> bool {
        self.participants
            .values()
            .all(|p| p.chars_typed() >= self.threshold)
    }

    pub fn all_have_names(&self) -> bool {
        self.participants.values().all(Participant::is_named)
    }

    /// Participant ids in join order.
    pub fn order(&self) -> &[ParticipantId] {
        &self.order
    }

    /// Participants in join order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> + '_ {
        self.order.iter().filter_map(|id| self.participants.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
