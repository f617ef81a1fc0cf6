//! Readiness rules evaluated with `Validation`.

use crate::config::MIN_PARTICIPANTS;
use crate::core::RegistryError;
use crate::readiness::checks::ReadinessCheck;
use crate::readiness::context::ReadinessContext;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type CheckResult = Validation<(), NonEmptyVec<ReadinessCheck>>;

fn require(holds: bool, check: ReadinessCheck) -> CheckResult {
    if holds {
        Validation::success(())
    } else {
        Validation::fail(check)
    }
}

/// Rules gating the switch from collecting to guessing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadinessRules {
    min_participants: usize,
}

impl Default for ReadinessRules {
    fn default() -> Self {
        Self::new(MIN_PARTICIPANTS)
    }
}

impl ReadinessRules {
    pub fn new(min_participants: usize) -> Self {
        Self { min_participants }
    }

    pub fn min_participants(&self) -> usize {
        self.min_participants
    }

    /// Evaluate every check, accumulating ALL unmet conditions.
    ///
    /// Fails only if the active participant is missing from the registry.
    pub fn evaluate(&self, context: &ReadinessContext<'_>) -> Result<ReadinessReport, RegistryError> {
        let registry = context.registry;
        let active = registry.get(context.active)?;

        let checks = vec![
            require(
                registry.has_enough_data(context.active)?,
                ReadinessCheck::ActiveHasData,
            ),
            require(
                registry.all_have_enough_data(),
                ReadinessCheck::EveryoneHasData,
            ),
            require(active.is_named(), ReadinessCheck::ActiveNamed),
            require(registry.all_have_names(), ReadinessCheck::EveryoneNamed),
            require(
                registry.len() >= self.min_participants,
                ReadinessCheck::EnoughParticipants,
            ),
        ];

        let mut unmet: Vec<ReadinessCheck> = match Validation::all_vec(checks) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(failures) => failures.iter().copied().collect(),
        };
        unmet.sort();

        Ok(ReadinessReport { unmet })
    }
}

/// Outcome of a readiness evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadinessReport {
    unmet: Vec<ReadinessCheck>,
}

impl ReadinessReport {
    pub fn is_ready(&self) -> bool {
        self.unmet.is_empty()
    }

    /// The highest-priority unmet condition, if any.
    pub fn first_unmet(&self) -> Option<ReadinessCheck> {
        self.unmet.first().copied()
    }

    /// Every unmet condition, in priority order.
    pub fn unmet(&self) -> &[ReadinessCheck] {
        &self.unmet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ParticipantId, Registry};

    fn mash(registry: &mut Registry, id: ParticipantId, count: u32) {
        for _ in 0..count {
            registry.record_keystroke(id).unwrap();
        }
    }

    #[test]
    fn fresh_single_participant_fails_everything_but_reports_data_first() {
        let mut registry = Registry::new();
        let active = registry.add_participant();

        let report = ReadinessRules::default()
            .evaluate(&ReadinessContext::new(&registry, active))
            .unwrap();

        assert!(!report.is_ready());
        assert_eq!(report.first_unmet(), Some(ReadinessCheck::ActiveHasData));
        assert_eq!(
            report.unmet(),
            &[
                ReadinessCheck::ActiveHasData,
                ReadinessCheck::EveryoneHasData,
                ReadinessCheck::ActiveNamed,
                ReadinessCheck::EveryoneNamed,
                ReadinessCheck::EnoughParticipants,
            ]
        );
    }

    #[test]
    fn data_shortfall_outranks_missing_names() {
        let mut registry = Registry::new();
        let a = registry.add_participant();
        let b = registry.add_participant();
        mash(&mut registry, a, 200);
        mash(&mut registry, b, 50);
        registry.rename_participant(a, "Alice".to_string()).unwrap();
        registry.rename_participant(b, "Bob".to_string()).unwrap();

        let report = ReadinessRules::default()
            .evaluate(&ReadinessContext::new(&registry, a))
            .unwrap();

        assert_eq!(report.first_unmet(), Some(ReadinessCheck::EveryoneHasData));
        assert_eq!(report.unmet(), &[ReadinessCheck::EveryoneHasData]);
    }

    #[test]
    fn complete_roster_is_ready() {
        let mut registry = Registry::new();
        let a = registry.add_participant();
        let b = registry.add_participant();
        mash(&mut registry, a, 180);
        mash(&mut registry, b, 180);
        registry.rename_participant(a, "Alice".to_string()).unwrap();
        registry.rename_participant(b, "Bob".to_string()).unwrap();

        let report = ReadinessRules::default()
            .evaluate(&ReadinessContext::new(&registry, b))
            .unwrap();

        assert!(report.is_ready());
        assert_eq!(report.first_unmet(), None);
        assert!(report.unmet().is_empty());
    }

    #[test]
    fn single_ready_participant_still_needs_company() {
        let mut registry = Registry::new();
        let a = registry.add_participant();
        mash(&mut registry, a, 180);
        registry.rename_participant(a, "Alice".to_string()).unwrap();

        let report = ReadinessRules::default()
            .evaluate(&ReadinessContext::new(&registry, a))
            .unwrap();

        assert_eq!(report.first_unmet(), Some(ReadinessCheck::EnoughParticipants));
    }

    #[test]
    fn missing_active_participant_is_an_error() {
        let registry = Registry::new();
        let result =
            ReadinessRules::default().evaluate(&ReadinessContext::new(&registry, ParticipantId::new()));
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }
}
