use std::collections::TryReserveError;
use std::io;
use std::sync::Arc;

use tracing::debug;

use crate::board::SharedBoard;
use crate::config::Config;
use crate::http::command::{self, CommandMatch};
use crate::http::request::InboundRequest;
use crate::http::response::{RenderError, RenderedResponse, Renderer};
use crate::http::stats::HandlerStats;

/// Default bytes read per data event, one TCP segment on Ethernet.
pub const DEFAULT_RECV_BUFFER_SIZE: usize = 1460;

/// Largest accepted receive buffer, the maximum IPv4 datagram size.
pub const MAX_RECV_BUFFER_SIZE: usize = 64 * 1024;

/// Failures that abort processing of one data event.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("failed to allocate {len} bytes for the request copy")]
    Allocation {
        len: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("failed to render status page: {0}")]
    Render(#[from] RenderError),
    #[error("failed to write response: {0}")]
    Io(#[from] io::Error),
}

impl HandlerError {
    /// Failure to copy a payload of `payload_len` bytes.
    pub fn allocation(payload_len: usize, source: TryReserveError) -> Self {
        HandlerError::Allocation {
            len: payload_len + 1,
            source,
        }
    }
}

/// Per-request logic shared by every connection.
///
/// Cheap to clone: the board and the counters are reference counted.
#[derive(Debug, Clone)]
pub struct RequestHandler {
    board: SharedBoard,
    renderer: Renderer,
    command_match: CommandMatch,
    close_after_response: bool,
    recv_buffer_size: usize,
    stats: Arc<HandlerStats>,
}

impl RequestHandler {
    pub fn new(board: SharedBoard) -> Self {
        Self {
            board,
            renderer: Renderer::new(true),
            command_match: CommandMatch::default(),
            close_after_response: true,
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
            stats: Arc::new(HandlerStats::new()),
        }
    }

    pub fn from_config(cfg: &Config, board: SharedBoard) -> Self {
        Self::new(board)
            .with_command_match(cfg.command_match)
            .with_close_after_response(cfg.close_after_response)
            .with_recv_buffer_size(cfg.recv_buffer_size)
    }

    pub fn with_command_match(mut self, mode: CommandMatch) -> Self {
        self.command_match = mode;
        self
    }

    /// Closing after each response also advertises `Connection: close`.
    pub fn with_close_after_response(mut self, close: bool) -> Self {
        self.close_after_response = close;
        self.renderer = Renderer::new(close);
        self
    }

    /// Clamped to `1..=MAX_RECV_BUFFER_SIZE`.
    pub fn with_recv_buffer_size(mut self, size: usize) -> Self {
        self.recv_buffer_size = size.clamp(1, MAX_RECV_BUFFER_SIZE);
        self
    }

    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    pub fn stats(&self) -> &Arc<HandlerStats> {
        &self.stats
    }

    pub fn close_after_response(&self) -> bool {
        self.close_after_response
    }

    pub fn recv_buffer_size(&self) -> usize {
        self.recv_buffer_size
    }

    /// Applies the request's command, samples the board and renders the page.
    ///
    /// The board lock is held while the command is applied and the inputs
    /// are read, so the page reflects exactly one consistent state.
    pub async fn process(&self, request: &InboundRequest<'_>) -> Result<RenderedResponse, HandlerError> {
        let (applied, snapshot, output) = {
            let mut board = self.board.lock().await;
            let applied = command::interpret(request, &mut board, self.command_match);
            (applied, board.sample(), board.output())
        };

        if let Some(cmd) = applied {
            debug!(command = ?cmd, output = ?output, "Applied indicator command");
        }
        debug!(
            button_a = ?snapshot.button_a,
            button_b = ?snapshot.button_b,
            temperature_c = snapshot.temperature_c,
            "Sampled board"
        );

        Ok(self.renderer.render(&snapshot, output)?)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;
    use crate::board::{Board, SimulatedBoard};

    #[test]
    fn allocation_error_counts_terminator() {
        let source = Vec::<u8>::new().try_reserve_exact(usize::MAX).unwrap_err();
        let err = HandlerError::allocation(29, source);

        assert!(matches!(err, HandlerError::Allocation { len: 30, .. }));
        assert_eq!(err.to_string(), "failed to allocate 30 bytes for the request copy");
        assert!(err.source().is_some());
    }

    #[test]
    fn recv_buffer_size_is_clamped() {
        let handler = RequestHandler::new(Board::new(SimulatedBoard::default()).into_shared());

        assert_eq!(handler.clone().with_recv_buffer_size(0).recv_buffer_size(), 1);
        assert_eq!(
            handler.clone().with_recv_buffer_size(usize::MAX).recv_buffer_size(),
            MAX_RECV_BUFFER_SIZE
        );
        assert_eq!(handler.with_recv_buffer_size(512).recv_buffer_size(), 512);
    }
}
