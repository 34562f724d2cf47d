//! Error types
//!
//! Startup failures surface as [`TransportError`] and abort the server.
//! Per-connection failures ([`RequestReadError`]) are logged and the
//! connection is closed. SOAP parse failures ([`SoapError`]) never leave the
//! dispatcher: an unroutable request becomes a SOAP fault instead.

use std::io;
use std::net::SocketAddr;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug)]
pub enum Error {
    /// Socket setup or accept failure
    Transport(TransportError),
    /// Request could not be read from a connection
    Request(RequestReadError),
    /// Inbound payload is not a usable SOAP envelope
    Soap(SoapError),
    /// Device state or server configuration is invalid
    Config(String),
    /// Other I/O failure (e.g. writing a response)
    Io(io::Error),
}

/// Listening socket failures
#[derive(Debug)]
pub enum TransportError {
    /// Could not create the socket
    Socket(io::Error),
    /// Could not bind to the configured address
    Bind { addr: SocketAddr, source: io::Error },
    /// Could not start listening
    Listen { addr: SocketAddr, source: io::Error },
    /// Accepting a single connection failed
    Accept(io::Error),
    /// The listening socket was already consumed by an earlier `run`
    NotListening,
}

/// Failures reading the single request buffer
#[derive(Debug)]
pub enum RequestReadError {
    /// Peer closed the connection without sending anything
    Empty,
    /// Read deadline elapsed
    Timeout,
    /// Underlying read failed
    Io(io::Error),
}

/// SOAP envelope parse failures
#[derive(Debug)]
pub enum SoapError {
    /// Payload is not well-formed XML
    Xml(quick_xml::Error),
    /// Root element is not an `Envelope`
    NotAnEnvelope,
    /// Envelope has no `Body` element
    MissingBody,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "Transport error: {}", e),
            Error::Request(e) => write!(f, "Request error: {}", e),
            Error::Soap(e) => write!(f, "SOAP error: {}", e),
            Error::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Socket(e) => write!(f, "failed to create socket: {}", e),
            TransportError::Bind { addr, source } => {
                write!(f, "failed to bind {}: {}", addr, source)
            }
            TransportError::Listen { addr, source } => {
                write!(f, "failed to listen on {}: {}", addr, source)
            }
            TransportError::Accept(e) => write!(f, "failed to accept connection: {}", e),
            TransportError::NotListening => write!(f, "server is no longer listening"),
        }
    }
}

impl std::fmt::Display for RequestReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestReadError::Empty => write!(f, "connection closed before any data was sent"),
            RequestReadError::Timeout => write!(f, "read timed out"),
            RequestReadError::Io(e) => write!(f, "read failed: {}", e),
        }
    }
}

impl std::fmt::Display for SoapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoapError::Xml(e) => write!(f, "malformed XML: {}", e),
            SoapError::NotAnEnvelope => write!(f, "root element is not a SOAP Envelope"),
            SoapError::MissingBody => write!(f, "SOAP Envelope has no Body"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(e) => Some(e),
            Error::Request(e) => Some(e),
            Error::Soap(e) => Some(e),
            Error::Config(_) => None,
            Error::Io(e) => Some(e),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Socket(e) | TransportError::Accept(e) => Some(e),
            TransportError::Bind { source, .. } | TransportError::Listen { source, .. } => {
                Some(source)
            }
            TransportError::NotListening => None,
        }
    }
}

impl std::error::Error for RequestReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestReadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for SoapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SoapError::Xml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}

impl From<RequestReadError> for Error {
    fn from(e: RequestReadError) -> Self {
        Error::Request(e)
    }
}

impl From<SoapError> for Error {
    fn from(e: SoapError) -> Self {
        Error::Soap(e)
    }
}

impl From<quick_xml::Error> for SoapError {
    fn from(e: quick_xml::Error) -> Self {
        SoapError::Xml(e)
    }
}
