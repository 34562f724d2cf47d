//! Server configuration

use std::net::SocketAddr;
use std::time::Duration;

use crate::soap::{SERVICE_PATH_DEVICE, SERVICE_PATH_MEDIA, SERVICE_PATH_PTZ};

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8080;

/// Server configuration options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,

    /// Host name used in advertised service and stream URLs
    pub advertised_host: String,

    /// Maximum concurrent connections (0 = unlimited)
    pub max_connections: usize,

    /// Deadline for reading the request and writing the response
    pub connection_timeout: Duration,

    /// Size of the single read buffer; longer requests are truncated
    pub read_buffer_size: usize,

    /// Enable TCP_NODELAY (disable Nagle's algorithm)
    pub tcp_nodelay: bool,

    /// Pending connection queue length passed to listen(2)
    pub listen_backlog: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            advertised_host: "localhost".into(),
            max_connections: 128,
            connection_timeout: Duration::from_secs(10),
            read_buffer_size: 4096,
            tcp_nodelay: true,
            listen_backlog: 128,
        }
    }
}

impl ServerConfig {
    /// Create a new config with custom bind address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Create a new config listening on all interfaces at `port`
    pub fn with_port(port: u16) -> Self {
        Self::default().port(port)
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the port, keeping the bind IP
    pub fn port(mut self, port: u16) -> Self {
        self.bind_addr.set_port(port);
        self
    }

    /// Set the host advertised in XAddrs and stream URIs
    pub fn advertised_host(mut self, host: impl Into<String>) -> Self {
        self.advertised_host = host.into();
        self
    }

    /// Set maximum connections
    pub fn max_connections(mut self, max: usize) -> Self {
        self.max_connections = max;
        self
    }

    /// Set connection timeout
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Set read buffer size
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.max(1);
        self
    }

    /// Enable or disable TCP_NODELAY on accepted sockets
    pub fn tcp_nodelay(mut self, enabled: bool) -> Self {
        self.tcp_nodelay = enabled;
        self
    }

    /// Set the listen backlog
    pub fn listen_backlog(mut self, backlog: u32) -> Self {
        self.listen_backlog = backlog;
        self
    }

    /// Configured HTTP port
    pub fn http_port(&self) -> u16 {
        self.bind_addr.port()
    }

    /// RTSP port advertised by `GetStreamUri`, always `http_port + 1`
    ///
    /// Computed in `u32` so port 65535 maps to 65536 instead of wrapping.
    pub fn rtsp_port(&self) -> u32 {
        u32::from(self.http_port()) + 1
    }

    /// Device management service XAddr
    pub fn device_service_url(&self) -> String {
        self.service_url(SERVICE_PATH_DEVICE)
    }

    /// Media service XAddr
    pub fn media_service_url(&self) -> String {
        self.service_url(SERVICE_PATH_MEDIA)
    }

    /// PTZ service XAddr
    pub fn ptz_service_url(&self) -> String {
        self.service_url(SERVICE_PATH_PTZ)
    }

    /// RTSP URI of the single advertised stream
    pub fn stream_uri(&self) -> String {
        format!("rtsp://{}:{}/stream1", self.advertised_host, self.rtsp_port())
    }

    fn service_url(&self, path: &str) -> String {
        format!(
            "http://{}:{}{}",
            self.advertised_host,
            self.http_port(),
            path
        )
    }
}
