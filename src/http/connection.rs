use std::io;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error};

use crate::http::handler::{HandlerError, RequestHandler};
use crate::http::request::InboundRequest;
use crate::http::writer::ResponseWriter;

/// Lifecycle of one accepted connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Waiting for the next data event.
    AwaitingData,
    /// Shutting the stream down. No further data is handled.
    Closing,
    Closed,
}

/// Outcome of one data event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerResult {
    /// A page was sent and the connection stays open.
    Responded,
    /// The connection is closed, either by the peer or after responding.
    Closed,
    /// Processing failed; the connection was dropped without a full response.
    Aborted,
}

pub struct Connection<S> {
    stream: S,
    handler: RequestHandler,
    buffer: BytesMut,
    state: ConnectionState,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: RequestHandler) -> Self {
        let buffer = BytesMut::with_capacity(handler.recv_buffer_size());
        Self {
            stream,
            handler,
            buffer,
            state: ConnectionState::AwaitingData,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Reads data events until the connection closes.
    ///
    /// Each read of up to `recv_buffer_size` bytes is one data event. A read
    /// of zero bytes is the peer closing. Read failures close the connection
    /// and are returned to the caller for logging.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        while self.state == ConnectionState::AwaitingData {
            self.buffer.clear();
            self.buffer.resize(self.handler.recv_buffer_size(), 0);

            let n = match self.stream.read(&mut self.buffer).await {
                Ok(n) => n,
                Err(e) if is_peer_gone(&e) => 0,
                Err(e) => {
                    self.close().await;
                    return Err(anyhow::Error::new(e).context("failed to read from connection"));
                }
            };

            let data = self.buffer.split_to(n).freeze();
            let payload = if data.is_empty() { None } else { Some(&data[..]) };
            self.on_data(payload).await;
        }

        Ok(())
    }

    /// Handles one data event.
    ///
    /// `None` or an empty payload means the peer closed: the connection is
    /// closed without touching the board. Otherwise the payload is copied,
    /// its command applied, the page rendered and written back. Errors never
    /// escape: they are logged, the connection is dropped and
    /// [`HandlerResult::Aborted`] is returned.
    pub async fn on_data(&mut self, data: Option<&[u8]>) -> HandlerResult {
        if self.state != ConnectionState::AwaitingData {
            return HandlerResult::Closed;
        }

        let payload = match data {
            Some(payload) if !payload.is_empty() => payload,
            _ => {
                debug!("Peer closed connection");
                self.close().await;
                return HandlerResult::Closed;
            }
        };

        match self.respond(payload).await {
            Ok(()) => {
                self.handler.stats().response_sent();
                if self.handler.close_after_response() {
                    self.close().await;
                    HandlerResult::Closed
                } else {
                    HandlerResult::Responded
                }
            }
            Err(e) => {
                error!(error = %e, "Dropping connection");
                self.handler.stats().request_aborted();
                self.close().await;
                HandlerResult::Aborted
            }
        }
    }

    async fn respond(&mut self, payload: &[u8]) -> Result<(), HandlerError> {
        let request = InboundRequest::copy_from(payload, self.handler.stats())
            .map_err(|source| HandlerError::allocation(payload.len(), source))?;
        debug!(len = request.len(), request = %request.text_lossy(), "Request received");

        let response = self.handler.process(&request).await?;
        ResponseWriter::new(response.as_bytes())
            .write_to_stream(&mut self.stream)
            .await?;

        Ok(())
    }

    async fn close(&mut self) {
        self.state = ConnectionState::Closing;
        if let Err(e) = self.stream.shutdown().await {
            debug!(error = %e, "Shutdown failed");
        }
        self.state = ConnectionState::Closed;
        self.handler.stats().connection_closed();
    }
}

fn is_peer_gone(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted | io::ErrorKind::UnexpectedEof
    )
}
