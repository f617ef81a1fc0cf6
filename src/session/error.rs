//! Session error types.

use crate::core::{Mode, ParticipantId, RegistryError};
use crate::readiness::ReadinessCheck;
use std::fmt;
use thiserror::Error;
use tracing::error;

/// Why an action was refused as an invalid transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The action is not available in the session's current mode
    WrongMode(Mode),
    /// The action named a participant the roster does not contain
    UnknownParticipant(ParticipantId),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongMode(mode) => write!(f, "not allowed while {:?}", mode),
            Self::UnknownParticipant(id) => write!(f, "unknown participant {}", id),
        }
    }
}

/// Errors returned by session operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    /// A participant id is missing from the registry. Always a caller bug.
    #[error("Participant {0} not found")]
    NotFound(ParticipantId),

    #[error("Cannot {operation}: {reason}")]
    InvalidTransition {
        operation: &'static str,
        reason: Rejection,
    },

    #[error("The current participant needs a name first")]
    NameRequired,

    #[error("Not ready to start guessing: {0}")]
    ReadinessNotMet(ReadinessCheck),
}

impl SessionError {
    /// True for errors that indicate a bug in the caller rather than a UI prompt.
    pub fn is_caller_bug(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<RegistryError> for SessionError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => {
                error!(participant = %id, "Session referenced a participant missing from the registry");
                Self::NotFound(id)
            }
        }
    }
}
