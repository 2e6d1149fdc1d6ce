use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by the request handler across all connections.
///
/// `buffers_acquired` and `buffers_released` track the owned request copy
/// made on every data event; once a connection has finished they are equal.
#[derive(Debug, Default)]
pub struct HandlerStats {
    buffers_acquired: AtomicU64,
    buffers_released: AtomicU64,
    responses_sent: AtomicU64,
    connections_closed: AtomicU64,
    aborted: AtomicU64,
}

/// Point-in-time copy of [`HandlerStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub buffers_acquired: u64,
    pub buffers_released: u64,
    pub responses_sent: u64,
    pub connections_closed: u64,
    pub aborted: u64,
}

impl HandlerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            buffers_acquired: self.buffers_acquired.load(Ordering::Acquire),
            buffers_released: self.buffers_released.load(Ordering::Acquire),
            responses_sent: self.responses_sent.load(Ordering::Relaxed),
            connections_closed: self.connections_closed.load(Ordering::Relaxed),
            aborted: self.aborted.load(Ordering::Relaxed),
        }
    }

    /// Request copies currently alive.
    pub fn buffers_outstanding(&self) -> u64 {
        let snap = self.snapshot();
        snap.buffers_acquired.saturating_sub(snap.buffers_released)
    }

    pub(crate) fn buffer_acquired(&self) {
        self.buffers_acquired.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn buffer_released(&self) {
        self.buffers_released.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn response_sent(&self) {
        self.responses_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn connection_closed(&self) {
        self.connections_closed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn request_aborted(&self) {
        self.aborted.fetch_add(1, Ordering::Relaxed);
    }
}
