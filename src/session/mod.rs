//! Session mode controller.
//!
//! Routes keystrokes to the active participant, forwards them to the
//! predictor, and enforces the rules for naming, advancing, and switching
//! into guessing mode.
//!
//! # Example
//!
//! ```rust
//! use mashguess::predictor::PredictionRequest;
//! use mashguess::session::{MashSession, SessionError};
//! use tokio::sync::mpsc;
//!
//! let (requests, _pending) = mpsc::unbounded_channel::<PredictionRequest>();
//! let mut session = MashSession::initialize("game-42", requests);
//!
//! assert!(session.handle_keystroke('J').unwrap().accepted);
//! assert_eq!(session.last_char(), Some('j'));
//!
//! assert_eq!(
//!     session.advance_to_next_participant(),
//!     Err(SessionError::NameRequired)
//! );
//! session.rename_current("Alice").unwrap();
//! let bob = session.advance_to_next_participant().unwrap();
//! assert_eq!(session.registry().order()[1], bob);
//! ```

mod controller;
mod error;
pub mod keys;

pub use controller::{KeystrokeOutcome, MashSession};
pub use error::{Rejection, SessionError};
