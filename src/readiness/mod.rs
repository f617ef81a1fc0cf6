//! Readiness gating for the switch into guessing mode.
//!
//! Uses Stillwater's `Validation` to collect every unmet condition in a
//! single pass, so a presentation layer can render a full checklist. The
//! session itself only ever reports the highest-priority failure, which
//! keeps exactly one prompt on screen at a time.
//!
//! # Example
//!
//! ```rust
//! use mashguess::core::Registry;
//! use mashguess::readiness::{ReadinessCheck, ReadinessContext, ReadinessRules};
//!
//! let mut registry = Registry::new();
//! let active = registry.add_participant();
//!
//! let report = ReadinessRules::default()
//!     .evaluate(&ReadinessContext::new(&registry, active))
//!     .unwrap();
//! assert_eq!(report.first_unmet(), Some(ReadinessCheck::ActiveHasData));
//! ```

pub mod checks;
pub mod context;
pub mod rules;

pub use checks::ReadinessCheck;
pub use context::ReadinessContext;
pub use rules::{ReadinessReport, ReadinessRules};
