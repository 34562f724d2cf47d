//! Statistics for the ONVIF server

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::soap::Action;

/// Live counters updated by the accept loop and connection tasks
#[derive(Debug)]
pub struct ServerMetrics {
    started_at: Instant,
    accepted: AtomicU64,
    throttled: AtomicU64,
    active: AtomicU64,
    responses: AtomicU64,
    faults: AtomicU64,
    read_failures: AtomicU64,
    bytes_received: AtomicU64,
    bytes_sent: AtomicU64,
}

impl ServerMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            accepted: AtomicU64::new(0),
            throttled: AtomicU64::new(0),
            active: AtomicU64::new(0),
            responses: AtomicU64::new(0),
            faults: AtomicU64::new(0),
            read_failures: AtomicU64::new(0),
            bytes_received: AtomicU64::new(0),
            bytes_sent: AtomicU64::new(0),
        }
    }

    /// Connection accepted and handed to a task
    pub fn on_accept(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
        self.active.fetch_add(1, Ordering::Relaxed);
    }

    /// Accept loop paused at the concurrency ceiling
    pub fn on_throttle(&self) {
        self.throttled.fetch_add(1, Ordering::Relaxed);
    }

    /// Connection task finished
    pub fn on_close(&self) {
        self.active.fetch_sub(1, Ordering::Relaxed);
    }

    /// Request could not be read
    pub fn on_read_failure(&self) {
        self.read_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Request bytes read
    pub fn on_request(&self, bytes: usize) {
        self.bytes_received.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Response written; `action` is `None` for a fault
    pub fn on_response(&self, action: Option<Action>, bytes: usize) {
        self.responses.fetch_add(1, Ordering::Relaxed);
        if action.is_none() {
            self.faults.fetch_add(1, Ordering::Relaxed);
        }
        self.bytes_sent.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters
    pub fn snapshot(&self) -> ServerStats {
        ServerStats {
            total_connections: self.accepted.load(Ordering::Relaxed),
            throttled: self.throttled.load(Ordering::Relaxed),
            active_connections: self.active.load(Ordering::Relaxed),
            responses: self.responses.load(Ordering::Relaxed),
            faults: self.faults.load(Ordering::Relaxed),
            read_failures: self.read_failures.load(Ordering::Relaxed),
            total_bytes_received: self.bytes_received.load(Ordering::Relaxed),
            total_bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            uptime: self.started_at.elapsed(),
        }
    }
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Server-wide statistics
#[derive(Debug, Clone, Default)]
pub struct ServerStats {
    /// Total connections accepted
    pub total_connections: u64,
    /// Times the accept loop waited for a free connection slot
    pub throttled: u64,
    /// Connections currently being handled
    pub active_connections: u64,
    /// Responses written, faults included
    pub responses: u64,
    /// SOAP faults written
    pub faults: u64,
    /// Connections closed without a response
    pub read_failures: u64,
    /// Total bytes received
    pub total_bytes_received: u64,
    /// Total bytes sent
    pub total_bytes_sent: u64,
    /// Uptime
    pub uptime: Duration,
}
