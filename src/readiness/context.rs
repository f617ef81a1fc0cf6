//! Inputs to a readiness evaluation.

use crate::core::{ParticipantId, Registry};

/// Snapshot of what the readiness checks look at
#[derive(Clone, Copy, Debug)]
pub struct ReadinessContext<'a> {
    pub registry: &'a Registry,
    pub active: ParticipantId,
}

impl<'a> ReadinessContext<'a> {
    pub fn new(registry: &'a Registry, active: ParticipantId) -> Self {
        Self { registry, active }
    }
}
