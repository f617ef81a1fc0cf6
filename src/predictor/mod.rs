//! Contract with the remote predictor that guesses who is typing.
//!
//! The session forwards every accepted keystroke through a [`Forwarder`]
//! without waiting. [`PredictorLink`] runs each call as a detached tokio
//! task and hands successful responses back through a [`PredictionInbox`];
//! failures are logged and dropped there, never surfaced to the session.
//!
//! Two predictors ship with the crate: [`TcpPredictor`], a client for the
//! JSON-over-TCP classifier protocol, and [`MashProfiler`], an in-process
//! predictor built on character n-gram profiles. [`serve`] exposes any
//! predictor over the same TCP protocol.

mod link;
mod profiler;
mod tcp;

pub use link::{Forwarder, PredictionInbox, PredictorLink};
pub use profiler::MashProfiler;
pub use tcp::{serve, TcpPredictor, MAX_MESSAGE_BYTES};

use crate::core::{ParticipantId, SessionId};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// One accepted keystroke on its way to the predictor.
///
/// Serializes to the classifier wire format:
/// `{"char": "q", "gameId": "...", "personId": "..."}`, with `personId`
/// omitted while guessing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "char")]
    pub character: char,
    #[serde(rename = "gameId")]
    pub session_id: SessionId,
    #[serde(
        rename = "personId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub participant_id: Option<ParticipantId>,
}

impl PredictionRequest {
    /// Labeled requests carry training data; unlabeled ones ask for a guess.
    pub fn is_labeled(&self) -> bool {
        self.participant_id.is_some()
    }
}

/// The predictor's answer. An absent id means "no guess this time".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(rename = "prediction", default, skip_serializing_if = "Option::is_none")]
    pub predicted_participant_id: Option<ParticipantId>,
}

impl PredictionResponse {
    pub fn guess(id: ParticipantId) -> Self {
        Self {
            predicted_participant_id: Some(id),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

/// Errors raised while talking to a predictor
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("Predictor I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Predictor message could not be encoded or decoded: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("Predictor message exceeds {limit} bytes")]
    MessageTooLarge { limit: u64 },

    #[error("Predictor did not answer within {0:?}")]
    Timeout(std::time::Duration),

    #[error("Predictor unavailable: {0}")]
    Unavailable(String),
}

impl PredictorError {
    /// The predictor answered, but with something that is not a valid response.
    pub fn is_malformed_answer(&self) -> bool {
        matches!(self, Self::Codec(_))
    }
}

/// Boxed future returned by [`Predictor::predict`].
pub type PredictionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<PredictionResponse, PredictorError>> + Send + 'a>>;

/// Anything that can answer prediction requests.
pub trait Predictor: Send + Sync {
    fn predict(&self, request: PredictionRequest) -> PredictionFuture<'_>;
}

impl<P: Predictor + ?Sized> Predictor for Arc<P> {
    fn predict(&self, request: PredictionRequest) -> PredictionFuture<'_> {
        (**self).predict(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_request_uses_classifier_field_names() {
        let person = ParticipantId::new();
        let request = PredictionRequest {
            character: 'q',
            session_id: SessionId::new("game-1"),
            participant_id: Some(person),
        };

        let json: serde_json::Value = serde_json::to_value(&request).unwrap();
        assert_eq!(json["char"], "q");
        assert_eq!(json["gameId"], "game-1");
        assert_eq!(json["personId"], person.to_string());
        assert!(request.is_labeled());
    }

    #[test]
    fn unlabeled_request_omits_person() {
        let request = PredictionRequest {
            character: ' ',
            session_id: SessionId::new("game-1"),
            participant_id: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("personId"));

        let back: PredictionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn empty_response_means_no_prediction() {
        let response: PredictionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response, PredictionResponse::none());
    }

    #[test]
    fn response_reads_prediction_field() {
        let id = ParticipantId::new();
        let response: PredictionResponse =
            serde_json::from_str(&format!(r#"{{"prediction": "{}"}}"#, id)).unwrap();
        assert_eq!(response, PredictionResponse::guess(id));
    }

    #[test]
    fn malformed_prediction_is_a_codec_error() {
        let result: Result<PredictionResponse, _> =
            serde_json::from_str(r#"{"prediction": "tyler"}"#);
        let error: PredictorError = result.unwrap_err().into();
        assert!(matches!(error, PredictorError::Codec(_)));
        assert!(error.is_malformed_answer());
    }

    #[test]
    fn transport_failures_are_not_malformed_answers() {
        let io = PredictorError::Io(std::io::Error::from(std::io::ErrorKind::ConnectionRefused));
        assert!(!io.is_malformed_answer());
        assert!(!PredictorError::Timeout(std::time::Duration::from_secs(1)).is_malformed_answer());
        assert!(!PredictorError::MessageTooLarge { limit: MAX_MESSAGE_BYTES }.is_malformed_answer());
    }
}
