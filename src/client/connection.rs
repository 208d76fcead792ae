//! A single TCP connection to the translation server.

use std::io;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::Instant;
use tokio_util::codec::Framed;

use crate::error::{ClientError, ClientResult};
use crate::protocol::{MultipartCodec, TranslationRequest, TranslationResponse};

pub(crate) struct Connection {
    framed: Framed<TcpStream, MultipartCodec>,
}

impl Connection {
    pub(crate) async fn open(address: &str, connect_timeout: Duration) -> ClientResult<Self> {
        let stream = tokio::time::timeout(connect_timeout, TcpStream::connect(address))
            .await
            .map_err(|_| ClientError::Connection {
                address: address.to_string(),
                source: io::Error::new(io::ErrorKind::TimedOut, "connect timed out"),
            })?
            .map_err(|source| ClientError::Connection {
                address: address.to_string(),
                source,
            })?;
        stream.set_nodelay(true)?;

        tracing::info!(address, "Connected to translation server");
        Ok(Self {
            framed: Framed::new(stream, MultipartCodec::new()),
        })
    }

    /// Send `request` and wait for its answer.
    ///
    /// Answers to earlier requests that timed out are read and dropped. The
    /// whole exchange is bounded by `timeout`.
    pub(crate) async fn round_trip(
        &mut self,
        request: &TranslationRequest,
        timeout: Duration,
    ) -> ClientResult<Vec<String>> {
        let deadline = Instant::now() + timeout;
        tokio::time::timeout_at(deadline, self.exchange(request))
            .await
            .map_err(|_| ClientError::Timeout(timeout))?
    }

    async fn exchange(&mut self, request: &TranslationRequest) -> ClientResult<Vec<String>> {
        self.framed.send(request.to_frames()).await?;
        tracing::debug!(
            request_id = %request.id,
            language = %request.language,
            phrases = request.phrases.len(),
            "Sent translation request"
        );

        loop {
            let frames = match self.framed.next().await {
                Some(frames) => frames?,
                None => {
                    return Err(ClientError::Io(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "translation server closed the connection",
                    )));
                }
            };

            match TranslationResponse::parse(request, &frames)? {
                TranslationResponse::Translations(translations) => return Ok(translations),
                TranslationResponse::Stale(response_id) => {
                    tracing::info!(
                        request_id = %request.id,
                        %response_id,
                        "Got a response for an old or unknown request"
                    );
                }
            }
        }
    }
}
