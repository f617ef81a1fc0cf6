//! Participants ("mashers") and their identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, immutable participant identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for ParticipantId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A single masher and the keystrokes they have contributed.
///
/// Only the name and the counter change after creation; the counter
/// never decreases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    name: String,
    chars_typed: u32,
}

impl Participant {
    pub(crate) fn new(id: ParticipantId) -> Self {
        Self {
            id,
            name: String::new(),
            chars_typed: 0,
        }
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Empty names mean "unnamed".
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn chars_typed(&self) -> u32 {
        self.chars_typed
    }

    pub(crate) fn rename(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn record_keystroke(&mut self) {
        self.chars_typed = self.chars_typed.saturating_add(1);
    }
}
