//! Core session types.
//!
//! This module contains the leaf data of a mashing session:
//! - Participants, their identifiers, and the session identifier
//! - The grow-only participant registry
//! - Session modes and the (possibly blinded) active pointer
//! - Immutable mode history
//!
//! Nothing here performs I/O.

mod history;
mod participant;
mod registry;
mod session_id;
mod state;

pub use history::{ModeHistory, ModeTransition};
pub use participant::{Participant, ParticipantId};
pub use registry::{Registry, RegistryError};
pub use session_id::SessionId;
pub use state::{ActiveParticipant, Mode, State};
