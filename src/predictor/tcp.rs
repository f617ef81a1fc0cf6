//! JSON-over-TCP predictor protocol.
//!
//! One request per connection: the client writes a JSON
//! [`PredictionRequest`] and closes its write half, the server answers with
//! a JSON [`PredictionResponse`] and closes the connection.

use super::{PredictionFuture, PredictionRequest, PredictionResponse, Predictor, PredictorError};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

/// Upper bound on a single request or response body.
pub const MAX_MESSAGE_BYTES: u64 = 1024;

async fn read_message<R: AsyncRead + Unpin>(reader: R) -> Result<Vec<u8>, PredictorError> {
    let mut buf = Vec::new();
    reader.take(MAX_MESSAGE_BYTES + 1).read_to_end(&mut buf).await?;
    if buf.len() as u64 > MAX_MESSAGE_BYTES {
        return Err(PredictorError::MessageTooLarge {
            limit: MAX_MESSAGE_BYTES,
        });
    }
    Ok(buf)
}

/// Client for a remote predictor process.
#[derive(Clone, Debug)]
pub struct TcpPredictor {
    addr: String,
}

impl TcpPredictor {
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    async fn round_trip(&self, request: PredictionRequest) -> Result<PredictionResponse, PredictorError> {
        let mut stream = TcpStream::connect(self.addr.as_str()).await?;

        let payload = serde_json::to_vec(&request)?;
        stream.write_all(&payload).await?;
        stream.shutdown().await?;

        let body = read_message(&mut stream).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl Predictor for TcpPredictor {
    fn predict(&self, request: PredictionRequest) -> PredictionFuture<'_> {
        Box::pin(self.round_trip(request))
    }
}

async fn handle_connection<P: Predictor + ?Sized>(
    mut stream: TcpStream,
    predictor: &P,
) -> Result<(), PredictorError> {
    let body = read_message(&mut stream).await?;
    let request: PredictionRequest = serde_json::from_slice(&body)?;

    let response = predictor.predict(request).await?;

    stream.write_all(&serde_json::to_vec(&response)?).await?;
    stream.shutdown().await?;
    Ok(())
}

/// Accept connections forever, answering each with `predictor`.
///
/// Returns only if accepting a connection fails.
pub async fn serve<P>(listener: TcpListener, predictor: Arc<P>) -> Result<(), PredictorError>
where
    P: Predictor + 'static,
{
    info!(addr = ?listener.local_addr().ok(), "Predictor listening");

    loop {
        let (stream, peer) = listener.accept().await?;
        debug!(%peer, "Predictor connection accepted");

        let predictor = Arc::clone(&predictor);
        tokio::spawn(async move {
            if let Err(error) = handle_connection(stream, predictor.as_ref()).await {
                warn!(%peer, %error, "Predictor connection failed");
            }
        });
    }
}
