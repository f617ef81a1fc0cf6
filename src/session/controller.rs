//! The mashing session state machine.

use crate::config::{ConfigError, SessionConfig};
use crate::core::{
    ActiveParticipant, Mode, ModeHistory, ModeTransition, Participant, ParticipantId, Registry,
    SessionId, State,
};
use crate::predictor::{Forwarder, PredictionInbox, PredictionRequest, PredictionResponse};
use crate::readiness::{ReadinessContext, ReadinessReport, ReadinessRules};
use crate::session::error::{Rejection, SessionError};
use crate::session::keys;
use chrono::Utc;
use std::fmt;
use tracing::{debug, info, trace};

/// Result of offering one raw character to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeystrokeOutcome {
    pub accepted: bool,
}

/// A single running game: roster, mode, and keystroke routing.
///
/// All state is owned here and changed only through the operations below,
/// one at a time. Predictor calls are handed to a [`Forwarder`] and never
/// awaited; their answers come back through [`MashSession::apply_prediction`].
pub struct MashSession {
    session_id: SessionId,
    config: SessionConfig,
    rules: ReadinessRules,
    registry: Registry,
    mode: Mode,
    active: ActiveParticipant,
    last_char: Option<char>,
    predicted: Option<ParticipantId>,
    history: ModeHistory,
    forwarder: Box<dyn Forwarder>,
}

impl MashSession {
    /// Start a session with one unnamed participant, collecting.
    pub fn initialize(session_id: impl Into<SessionId>, forwarder: impl Forwarder + 'static) -> Self {
        Self::build(session_id.into(), SessionConfig::default(), Box::new(forwarder))
    }

    pub fn with_config(
        session_id: impl Into<SessionId>,
        config: SessionConfig,
        forwarder: impl Forwarder + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(session_id.into(), config, Box::new(forwarder)))
    }

    fn build(session_id: SessionId, config: SessionConfig, forwarder: Box<dyn Forwarder>) -> Self {
        let mut registry = Registry::with_threshold(config.readiness_threshold);
        let first = registry.add_participant();
        info!(session = %session_id, "Session initialized");

        Self {
            session_id,
            rules: ReadinessRules::new(config.min_participants),
            config,
            registry,
            mode: Mode::Collecting,
            active: ActiveParticipant::Known(first),
            last_char: None,
            predicted: None,
            history: ModeHistory::new(),
            forwarder,
        }
    }

    /// The active participant, or `InvalidTransition` once blinded.
    fn require_known(&self, operation: &'static str) -> Result<ParticipantId, SessionError> {
        match self.active {
            ActiveParticipant::Known(id) => Ok(id),
            ActiveParticipant::Blinded => Err(SessionError::InvalidTransition {
                operation,
                reason: Rejection::WrongMode(self.mode),
            }),
        }
    }

    pub fn handle_keystroke(&mut self, raw: char) -> Result<KeystrokeOutcome, SessionError> {
        let Some(character) = keys::normalize(raw) else {
            trace!(?raw, "Keystroke rejected");
            return Ok(KeystrokeOutcome { accepted: false });
        };

        if let ActiveParticipant::Known(id) = self.active {
            self.registry.record_keystroke(id)?;
        }
        self.last_char = Some(character);

        self.forwarder.forward(PredictionRequest {
            character,
            session_id: self.session_id.clone(),
            participant_id: self.active.known(),
        });
        trace!(mode = self.mode.name(), "Keystroke accepted");

        Ok(KeystrokeOutcome { accepted: true })
    }

    /// Apply a predictor answer. Latest answer wins; an empty answer keeps
    /// the previous guess. Returns whether the guess changed.
    pub fn apply_prediction(&mut self, response: PredictionResponse) -> bool {
        let Some(id) = response.predicted_participant_id else {
            return false;
        };
        if !self.registry.contains(id) {
            debug!(predicted = %id, "Predictor named a participant outside the roster");
        }
        let changed = self.predicted != Some(id);
        self.predicted = Some(id);
        changed
    }

    /// Apply every response already waiting in `inbox`. Returns how many
    /// carried a guess.
    pub fn drain_predictions(&mut self, inbox: &mut PredictionInbox) -> usize {
        let mut applied = 0;
        while let Some(response) = inbox.try_recv() {
            if response.predicted_participant_id.is_some() {
                applied += 1;
            }
            self.apply_prediction(response);
        }
        applied
    }

    pub fn select_participant(&mut self, id: ParticipantId) -> Result<(), SessionError> {
        const OPERATION: &str = "select participant";
        self.require_known(OPERATION)?;
        if !self.registry.contains(id) {
            return Err(SessionError::InvalidTransition {
                operation: OPERATION,
                reason: Rejection::UnknownParticipant(id),
            });
        }

        self.active = ActiveParticipant::Known(id);
        self.last_char = None;
        debug!(participant = %id, "Participant selected");
        Ok(())
    }

    /// Add a fresh participant and make them active. The current one must
    /// be named first.
    pub fn advance_to_next_participant(&mut self) -> Result<ParticipantId, SessionError> {
        let current = self.require_known("advance to next participant")?;
        if !self.registry.get(current)?.is_named() {
            debug!(participant = %current, "Advance refused, participant unnamed");
            return Err(SessionError::NameRequired);
        }

        let next = self.registry.add_participant();
        self.active = ActiveParticipant::Known(next);
        self.last_char = None;
        Ok(next)
    }

    pub fn rename_current(&mut self, name: impl Into<String>) -> Result<(), SessionError> {
        let current = self.require_known("rename current participant")?;
        self.registry.rename_participant(current, name.into())?;
        Ok(())
    }

    /// Evaluate every readiness condition without changing anything.
    pub fn readiness(&self) -> Result<ReadinessReport, SessionError> {
        let active = self.require_known("evaluate readiness")?;
        Ok(self
            .rules
            .evaluate(&ReadinessContext::new(&self.registry, active))?)
    }

    /// Hide the typist's identity and let the predictor take over.
    ///
    /// There is no way back to collecting within the same session.
    pub fn begin_guessing(&mut self) -> Result<(), SessionError> {
        self.require_known("begin guessing")?;
        let report = self.readiness()?;
        if let Some(unmet) = report.first_unmet() {
            debug!(%unmet, "Guessing refused");
            return Err(SessionError::ReadinessNotMet(unmet));
        }

        let transition = ModeTransition {
            from: self.mode,
            to: Mode::Guessing,
            timestamp: Utc::now(),
            roster_size: self.registry.len(),
        };
        info!(
            session = %self.session_id,
            roster_size = transition.roster_size,
            "{}",
            transition.describe()
        );
        self.history = self.history.record(transition);
        self.mode = Mode::Guessing;
        self.active = ActiveParticipant::Blinded;
        self.last_char = None;
        Ok(())
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn active(&self) -> ActiveParticipant {
        self.active
    }

    pub fn last_char(&self) -> Option<char> {
        self.last_char
    }

    pub fn predicted_participant_id(&self) -> Option<ParticipantId> {
        self.predicted
    }

    /// The predicted participant, if the guess names someone on the roster.
    pub fn predicted_participant(&self) -> Option<&Participant> {
        self.predicted.and_then(|id| self.registry.get(id).ok())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn history(&self) -> &ModeHistory {
        &self.history
    }
}

impl fmt::Debug for MashSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MashSession")
            .field("session_id", &self.session_id)
            .field("mode", &self.mode)
            .field("active", &self.active)
            .field("participants", &self.registry.len())
            .field("last_char", &self.last_char)
            .field("predicted", &self.predicted)
            .finish_non_exhaustive()
    }
}
