//! Per-connection context
//!
//! Created when a connection is accepted, owned by the task that handles
//! it, and dropped once the response has been written.

use std::borrow::Cow;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use bytes::Bytes;

use crate::soap::Action;

/// Request lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    /// Connected, request not read yet
    Reading,
    /// Request read, resolving the action
    Routing,
    /// Response produced (terminal)
    Responded,
}

/// State of a single request/response exchange
#[derive(Debug, Clone)]
pub struct ConnectionContext {
    /// Unique session ID
    pub session_id: u64,

    /// Remote peer address
    pub peer_addr: SocketAddr,

    /// Current phase
    pub phase: RequestPhase,

    /// Raw bytes from the single read
    pub request: Bytes,

    /// Resolved action, `None` when the request was answered with a fault
    pub action: Option<Action>,

    /// Connection start time
    pub connected_at: Instant,
}

impl ConnectionContext {
    /// Create a new context
    pub fn new(session_id: u64, peer_addr: SocketAddr) -> Self {
        Self {
            session_id,
            peer_addr,
            phase: RequestPhase::Reading,
            request: Bytes::new(),
            action: None,
            connected_at: Instant::now(),
        }
    }

    /// Store the request bytes and move to routing
    pub fn on_request(&mut self, request: Bytes) {
        if self.phase == RequestPhase::Reading {
            self.request = request;
            self.phase = RequestPhase::Routing;
        }
    }

    /// Record the routing outcome; this is the terminal transition
    pub fn on_responded(&mut self, action: Option<Action>) {
        if self.phase == RequestPhase::Routing {
            self.action = action;
            self.phase = RequestPhase::Responded;
        }
    }

    /// Request as text, with invalid UTF-8 replaced
    pub fn request_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.request)
    }

    /// Time since the connection was accepted
    pub fn duration(&self) -> Duration {
        self.connected_at.elapsed()
    }
}
