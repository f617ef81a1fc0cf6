//! Session modes and the active-participant pointer.
//!
//! A session starts in [`Mode::Collecting`] and may move once to
//! [`Mode::Guessing`]. While guessing, the typist's identity is withheld
//! from local state: [`ActiveParticipant::Blinded`] carries no id at all,
//! so nothing can read it by accident.

use super::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure. States are small values describing where a
/// session is in its lifecycle.
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name for display/logging.
    fn name(&self) -> &str;

    /// Terminal states accept no further transitions.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// What the session is doing with keystrokes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Keystrokes are labeled with the active participant.
    #[default]
    Collecting,
    /// Keystrokes are unlabeled and the predictor names the typist.
    Guessing,
}

impl State for Mode {
    fn name(&self) -> &str {
        match self {
            Self::Collecting => "Collecting",
            Self::Guessing => "Guessing",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Guessing)
    }
}

/// The participant currently typing, or the blinded sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveParticipant {
    Known(ParticipantId),
    Blinded,
}

impl ActiveParticipant {
    pub fn known(&self) -> Option<ParticipantId> {
        match self {
            Self::Known(id) => Some(*id),
            Self::Blinded => None,
        }
    }

    pub fn is_blinded(&self) -> bool {
        matches!(self, Self::Blinded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names() {
        assert_eq!(Mode::Collecting.name(), "Collecting");
        assert_eq!(Mode::Guessing.name(), "Guessing");
    }

    #[test]
    fn guessing_is_terminal() {
        assert!(!Mode::Collecting.is_final());
        assert!(Mode::Guessing.is_final());
        assert_eq!(Mode::default(), Mode::Collecting);
    }

    #[test]
    fn blinded_pointer_exposes_no_id() {
        let id = ParticipantId::new();
        assert_eq!(ActiveParticipant::Known(id).known(), Some(id));
        assert_eq!(ActiveParticipant::Blinded.known(), None);
        assert!(ActiveParticipant::Blinded.is_blinded());
    }

    #[test]
    fn active_pointer_serializes() {
        let json = serde_json::to_string(&ActiveParticipant::Blinded).unwrap();
        assert_eq!(json, r#""Blinded""#);

        let id = ParticipantId::new();
        let json = serde_json::to_string(&ActiveParticipant::Known(id)).unwrap();
        let back: ActiveParticipant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ActiveParticipant::Known(id));
    }
}
