//! Connection handling
//!
//! Each connection carries exactly one exchange: a single bounded read,
//! dispatch, one HTTP response, close. The read does not loop, so a request
//! larger than the buffer, or split across TCP segments, is truncated to
//! whatever the first read returned.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{timeout_at, Instant};

use crate::error::{Error, RequestReadError, Result};
use crate::server::config::ServerConfig;
use crate::server::dispatch::Dispatcher;
use crate::session::ConnectionContext;
use crate::stats::ServerMetrics;

/// Content type of every response
pub const CONTENT_TYPE_SOAP: &str = "application/soap+xml; charset=utf-8";

/// Frame a SOAP envelope as an HTTP/1.1 200 response
pub fn http_response(envelope: &str) -> Bytes {
    let header = format!(
        concat!(
            "HTTP/1.1 200 OK\r\n",
            "Content-Type: {content_type}\r\n",
            "Content-Length: {length}\r\n",
            "Connection: close\r\n",
            "\r\n"
        ),
        content_type = CONTENT_TYPE_SOAP,
        length = envelope.len(),
    );

    let mut buf = BytesMut::with_capacity(header.len() + envelope.len());
    buf.put_slice(header.as_bytes());
    buf.put_slice(envelope.as_bytes());
    buf.freeze()
}

/// A single accepted connection
pub struct Connection {
    ctx: ConnectionContext,
    socket: TcpStream,
    config: Arc<ServerConfig>,
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<ServerMetrics>,
}

impl Connection {
    pub fn new(
        session_id: u64,
        socket: TcpStream,
        peer_addr: SocketAddr,
        config: Arc<ServerConfig>,
        dispatcher: Arc<Dispatcher>,
        metrics: Arc<ServerMetrics>,
    ) -> Self {
        Self {
            ctx: ConnectionContext::new(session_id, peer_addr),
            socket,
            config,
            dispatcher,
            metrics,
        }
    }

    /// Read one request, answer it and close
    ///
    /// Reading and writing share one deadline of `connection_timeout`.
    pub async fn run(&mut self) -> Result<()> {
        let deadline = Instant::now() + self.config.connection_timeout;

        let request = match self.read_request(deadline).await {
            Ok(request) => request,
            Err(e) => {
                self.metrics.on_read_failure();
                return Err(e.into());
            }
        };
        self.metrics.on_request(request.len());
        self.ctx.on_request(request);
        tracing::trace!(
            session_id = self.ctx.session_id,
            request = %self.ctx.request_text(),
            "Received request"
        );

        let response = self.dispatcher.dispatch(&self.ctx.request);
        self.ctx.on_responded(response.action);

        match response.action {
            Some(action) => tracing::debug!(
                session_id = self.ctx.session_id,
                action = %action,
                "Dispatched request"
            ),
            None => tracing::debug!(
                session_id = self.ctx.session_id,
                "No supported action, answering with fault"
            ),
        }

        let bytes = http_response(&response.envelope);
        match timeout_at(deadline, self.socket.write_all(&bytes)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "response write timed out",
                )))
            }
        }
        self.metrics.on_response(response.action, bytes.len());

        // Peer may already be gone; the response is out either way
        let _ = self.socket.shutdown().await;

        tracing::debug!(
            session_id = self.ctx.session_id,
            elapsed_ms = self.ctx.duration().as_millis() as u64,
            "Request completed"
        );
        Ok(())
    }

    async fn read_request(
        &mut self,
        deadline: Instant,
    ) -> std::result::Result<Bytes, RequestReadError> {
        let mut buf = BytesMut::with_capacity(self.config.read_buffer_size);

        let n = match timeout_at(deadline, self.socket.read_buf(&mut buf)).await {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(RequestReadError::Io(e)),
            Err(_) => return Err(RequestReadError::Timeout),
        };

        if n == 0 {
            return Err(RequestReadError::Empty);
        }

        Ok(buf.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_framing() {
        let envelope = "<SOAP-ENV:Envelope/>";
        let bytes = http_response(envelope);
        let text = std::str::from_utf8(&bytes).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: application/soap+xml; charset=utf-8\r\n"));
        assert!(text.contains(&format!("Content-Length: {}\r\n", envelope.len())));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with("\r\n\r\n<SOAP-ENV:Envelope/>"));
    }

    #[test]
    fn test_content_length_counts_bytes() {
        let envelope = "<x>caméra</x>";
        let bytes = http_response(envelope);
        let text = std::str::from_utf8(&bytes).unwrap();

        // 'é' is two bytes in UTF-8
        assert!(text.contains("Content-Length: 14\r\n"));
    }
}
