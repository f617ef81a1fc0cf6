//! Serializable read model of a session for presentation layers.
//!
//! A snapshot is a one-way export: it describes what to render and is
//! never used to rebuild a session. While guessing, the snapshot carries
//! [`ActiveParticipant::Blinded`] and nothing that identifies the typist.

use crate::core::{ActiveParticipant, Mode, ParticipantId, SessionId};
use crate::session::MashSession;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// One roster row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: ParticipantId,
    pub name: String,
    pub chars_typed: u32,
    pub has_enough_data: bool,
}

/// Everything a view needs to draw the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    pub session_id: SessionId,

    pub mode: Mode,

    /// Participants in join order
    pub roster: Vec<RosterEntry>,

    pub active: ActiveParticipant,

    pub last_char: Option<char>,

    pub predicted_participant_id: Option<ParticipantId>,

    /// When the session switched to guessing
    pub guessing_since: Option<DateTime<Utc>>,

    /// Prompt for the highest-priority unmet readiness condition, if any.
    /// Always `None` once guessing.
    pub readiness_prompt: Option<String>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::Decode(e.to_string()))?;
        snapshot.check_version()
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::Decode(e.to_string()))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}

impl MashSession {
    /// Capture the current state for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        let registry = self.registry();
        let roster = registry
            .iter()
            .map(|p| RosterEntry {
                id: p.id(),
                name: p.name().to_string(),
                chars_typed: p.chars_typed(),
                has_enough_data: p.chars_typed() >= registry.threshold(),
            })
            .collect();

        let readiness_prompt = self
            .readiness()
            .ok()
            .and_then(|report| report.first_unmet())
            .map(|unmet| unmet.prompt().to_string());

        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            timestamp: Utc::now(),
            session_id: self.session_id().clone(),
            mode: self.mode(),
            roster,
            active: self.active(),
            last_char: self.last_char(),
            predicted_participant_id: self.predicted_participant_id(),
            guessing_since: self.history().entered_at(Mode::Guessing),
            readiness_prompt,
        }
    }
}
