//! Mashguess: the session core of a keyboard-mashing guessing game
//!
//! Participants take turns mashing a shared keyboard. The session counts
//! each participant's keystrokes while collecting, and once everyone has
//! typed enough and has a name it can switch into guessing mode, where the
//! typist's identity is hidden and a predictor names them from keystrokes
//! alone.
//!
//! # Core Concepts
//!
//! - **Registry**: Grow-only roster with per-participant keystroke counts
//! - **Session**: Mode controller that routes keystrokes and gates transitions
//! - **Readiness**: Ordered conditions for entering guessing mode
//! - **Predictor**: Fire-and-forget keystroke forwarding, last answer wins
//!
//! # Example
//!
//! ```rust
//! use mashguess::config::READINESS_THRESHOLD;
//! use mashguess::core::{ActiveParticipant, Mode};
//! use mashguess::predictor::PredictionRequest;
//! use mashguess::session::MashSession;
//! use tokio::sync::mpsc;
//!
//! let (requests, _pending) = mpsc::unbounded_channel::<PredictionRequest>();
//! let mut session = MashSession::initialize("game-7", requests);
//!
//! for name in ["Alice", "Bob"] {
//!     if name == "Bob" {
//!         session.advance_to_next_participant().unwrap();
//!     }
//!     for _ in 0..READINESS_THRESHOLD {
//!         session.handle_keystroke('k').unwrap();
//!     }
//!     session.rename_current(name).unwrap();
//! }
//!
//! session.begin_guessing().unwrap();
//! assert_eq!(session.mode(), Mode::Guessing);
//! assert_eq!(session.active(), ActiveParticipant::Blinded);
//! ```

pub mod config;
pub mod core;
pub mod predictor;
pub mod readiness;
pub mod session;
pub mod snapshot;

// Re-export commonly used types
pub use config::SessionConfig;
pub use core::{ActiveParticipant, Mode, Participant, ParticipantId, Registry, SessionId};
pub use readiness::ReadinessCheck;
pub use session::{MashSession, SessionError};
pub use snapshot::SessionSnapshot;
