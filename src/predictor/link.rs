//! Fire-and-forget dispatch of keystrokes to a predictor.

use crate::config::SessionConfig;
use super::{PredictionRequest, PredictionResponse, Predictor, PredictorError};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Outbound side of the predictor contract as seen by a session.
///
/// `forward` must return immediately; the session never waits on the
/// predictor.
pub trait Forwarder: Send {
    fn forward(&self, request: PredictionRequest);
}

/// Queue requests for a consumer that talks to the predictor itself.
impl Forwarder for mpsc::UnboundedSender<PredictionRequest> {
    fn forward(&self, request: PredictionRequest) {
        if self.send(request).is_err() {
            debug!("Prediction request queue closed, dropping keystroke");
        }
    }
}

/// Runs each request as a detached task on a tokio runtime.
///
/// Nothing is cancelled or retried. Calls that fail or time out are logged
/// and produce no response.
pub struct PredictorLink {
    predictor: Arc<dyn Predictor>,
    handle: Handle,
    timeout: Duration,
    responses: mpsc::UnboundedSender<PredictionResponse>,
}

impl PredictorLink {
    pub fn new(
        predictor: Arc<dyn Predictor>,
        handle: Handle,
        timeout: Duration,
    ) -> (Self, PredictionInbox) {
        let (responses, inbox) = PredictionInbox::channel();
        let link = Self {
            predictor,
            handle,
            timeout,
            responses,
        };
        (link, inbox)
    }

    /// Link whose call timeout is the session's `predictor_timeout_ms`.
    pub fn from_config(
        predictor: Arc<dyn Predictor>,
        handle: Handle,
        config: &SessionConfig,
    ) -> (Self, PredictionInbox) {
        Self::new(predictor, handle, config.predictor_timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build a link on the runtime the caller is running inside.
    pub fn on_current_runtime(
        predictor: Arc<dyn Predictor>,
        timeout: Duration,
    ) -> Result<(Self, PredictionInbox), PredictorError> {
        let handle = Handle::try_current()
            .map_err(|e| PredictorError::Unavailable(format!("no tokio runtime: {e}")))?;
        Ok(Self::new(predictor, handle, timeout))
    }
}

impl Forwarder for PredictorLink {
    fn forward(&self, request: PredictionRequest) {
        let predictor = Arc::clone(&self.predictor);
        let responses = self.responses.clone();
        let timeout = self.timeout;

        self.handle.spawn(async move {
            match tokio::time::timeout(timeout, predictor.predict(request)).await {
                Ok(Ok(response)) => {
                    if responses.send(response).is_err() {
                        trace!("Prediction inbox dropped, discarding response");
                    }
                }
                Ok(Err(error)) if error.is_malformed_answer() => {
                    debug!(%error, "Unparseable prediction answer dropped")
                }
                Ok(Err(error)) => warn!(%error, "Predictor call failed"),
                Err(_) => warn!(error = %PredictorError::Timeout(timeout), "Predictor call timed out"),
            }
        });
    }
}

/// Responses delivered by a [`PredictorLink`], in arrival order.
#[derive(Debug)]
pub struct PredictionInbox {
    responses: mpsc::UnboundedReceiver<PredictionResponse>,
}

impl PredictionInbox {
    pub(crate) fn channel() -> (mpsc::UnboundedSender<PredictionResponse>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { responses: rx })
    }

    /// Wait for the next response. `None` once the link is gone and drained.
    pub async fn recv(&mut self) -> Option<PredictionResponse> {
        self.responses.recv().await
    }

    /// Take a response that has already arrived, without waiting.
    pub fn try_recv(&mut self) -> Option<PredictionResponse> {
        self.responses.try_recv().ok()
    }
}
