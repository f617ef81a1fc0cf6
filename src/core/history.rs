//! Mode transition history.
//!
//! Provides immutable tracking of a session's mode changes over time.

use super::state::{Mode, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single mode change.
///
/// # Example
///
/// ```rust
/// use mashguess::core::{Mode, ModeTransition};
/// use chrono::Utc;
///
/// let transition = ModeTransition {
///     from: Mode::Collecting,
///     to: Mode::Guessing,
///     timestamp: Utc::now(),
///     roster_size: 2,
/// };
/// assert_eq!(transition.describe(), "Collecting -> Guessing");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeTransition {
    /// The mode being left
    pub from: Mode,
    /// The mode being entered
    pub to: Mode,
    /// When the change happened
    pub timestamp: DateTime<Utc>,
    /// Number of participants at the time of the change
    pub roster_size: usize,
}

impl ModeTransition {
    pub fn describe(&self) -> String {
        format!("{} -> {}", self.from.name(), self.to.name())
    }
}

/// Ordered history of mode changes.
///
/// History is immutable - `record` returns a new history with the
/// transition added.
///
/// # Example
///
/// ```rust
/// use mashguess::core::{Mode, ModeHistory, ModeTransition};
/// use chrono::Utc;
///
/// let history = ModeHistory::new();
/// let history = history.record(ModeTransition {
///     from: Mode::Collecting,
///     to: Mode::Guessing,
///     timestamp: Utc::now(),
///     roster_size: 3,
/// });
///
/// assert_eq!(history.get_path(), vec![&Mode::Collecting, &Mode::Guessing]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeHistory {
    transitions: Vec<ModeTransition>,
}

impl ModeHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: ModeTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Modes traversed: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&Mode> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// When the session first entered `mode`, if it ever did.
    pub fn entered_at(&self, mode: Mode) -> Option<DateTime<Utc>> {
        self.transitions
            .iter()
            .find(|t| t.to == mode)
            .map(|t| t.timestamp)
    }

    pub fn transitions(&self) -> &[ModeTransition] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_guessing(roster_size: usize) -> ModeTransition {
        ModeTransition {
            from: Mode::Collecting,
            to: Mode::Guessing,
            timestamp: Utc::now(),
            roster_size,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = ModeHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.entered_at(Mode::Guessing).is_none());
    }

    #[test]
    fn record_does_not_mutate_original() {
        let history = ModeHistory::new();
        let recorded = history.record(to_guessing(2));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(recorded.transitions().len(), 1);
        assert_eq!(recorded.transitions()[0].roster_size, 2);
    }

    #[test]
    fn entered_at_finds_guessing() {
        let transition = to_guessing(4);
        let stamp = transition.timestamp;
        let history = ModeHistory::new().record(transition);

        assert_eq!(history.entered_at(Mode::Guessing), Some(stamp));
        assert!(history.entered_at(Mode::Collecting).is_none());
    }

    #[test]
    fn history_serializes() {
        let history = ModeHistory::new().record(to_guessing(2));
        let json = serde_json::to_string(&history).unwrap();
        let back: ModeHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
