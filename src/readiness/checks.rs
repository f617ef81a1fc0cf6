//! The readiness conditions and their user-facing prompts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One condition that must hold before guessing can begin.
///
/// Variants are declared in priority order; `Ord` follows that order, so
/// the smallest unmet check is the one to report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReadinessCheck {
    /// The active participant has reached the keystroke threshold.
    ActiveHasData,
    /// Every participant has reached the keystroke threshold.
    EveryoneHasData,
    /// The active participant has a name.
    ActiveNamed,
    /// Every participant has a name.
    EveryoneNamed,
    /// The roster is large enough to guess between.
    EnoughParticipants,
}

impl ReadinessCheck {
    /// All checks in evaluation order.
    pub const ALL: [ReadinessCheck; 5] = [
        Self::ActiveHasData,
        Self::EveryoneHasData,
        Self::ActiveNamed,
        Self::EveryoneNamed,
        Self::EnoughParticipants,
    ];

    /// Prompt shown when this check is the first one failing.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::ActiveHasData => "Keep mashing! We need more data from you.",
            Self::EveryoneHasData => "Everyone else needs to mash some more too.",
            Self::ActiveNamed => "Enter your name before moving on.",
            Self::EveryoneNamed => "Everyone needs a name.",
            Self::EnoughParticipants => "Add another masher to start guessing.",
        }
    }
}

impl fmt::Display for ReadinessCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ActiveHasData => "active participant needs more data",
            Self::EveryoneHasData => "others need more data",
            Self::ActiveNamed => "active participant needs a name",
            Self::EveryoneNamed => "everyone needs a name",
            Self::EnoughParticipants => "not enough participants",
        };
        f.write_str(label)
    }
}
