//! ONVIF server listener
//!
//! Handles TCP accept loop and spawns connection handlers.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::sync::{watch, OwnedSemaphorePermit, Semaphore};

use crate::device::DeviceState;
use crate::error::{Result, TransportError};
use crate::server::config::ServerConfig;
use crate::server::connection::Connection;
use crate::server::dispatch::Dispatcher;
use crate::stats::{ServerMetrics, ServerStats};

/// ONVIF server
///
/// Lifecycle: [`start`](Self::start) binds the socket, [`run`](Self::run)
/// accepts until [`stop`](Self::stop) is called. Connection tasks are
/// detached; stopping does not cancel requests already in flight.
pub struct OnvifServer {
    config: Arc<ServerConfig>,
    device: Arc<DeviceState>,
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<ServerMetrics>,
    listener: Mutex<Option<TcpListener>>,
    local_addr: SocketAddr,
    shutdown: watch::Sender<bool>,
    next_session_id: AtomicU64,
    connection_semaphore: Option<Arc<Semaphore>>,
}

impl OnvifServer {
    /// Bind and listen on the configured address
    ///
    /// Must be called from within a Tokio runtime. If the configured port is
    /// 0, the port assigned by the OS is used for advertised URLs.
    pub fn start(mut config: ServerConfig, device: DeviceState) -> Result<Self> {
        let addr = config.bind_addr;

        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .map_err(TransportError::Socket)?;
        socket
            .set_reuseaddr(true)
            .map_err(TransportError::Socket)?;

        socket
            .bind(addr)
            .map_err(|source| TransportError::Bind { addr, source })?;
        let listener = socket
            .listen(config.listen_backlog)
            .map_err(|source| TransportError::Listen { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| TransportError::Listen { addr, source })?;

        if config.bind_addr.port() == 0 {
            config.bind_addr.set_port(local_addr.port());
        }

        let connection_semaphore = if config.max_connections > 0 {
            Some(Arc::new(Semaphore::new(config.max_connections)))
        } else {
            None
        };

        let config = Arc::new(config);
        let device = Arc::new(device);
        let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&config), Arc::clone(&device)));
        let (shutdown, _) = watch::channel(false);

        tracing::info!(addr = %local_addr, "ONVIF server listening");
        tracing::info!(
            device_service = %config.device_service_url(),
            media_service = %config.media_service_url(),
            ptz_service = %config.ptz_service_url(),
            "Advertised services"
        );

        Ok(Self {
            config,
            device,
            dispatcher,
            metrics: Arc::new(ServerMetrics::new()),
            listener: Mutex::new(Some(listener)),
            local_addr,
            shutdown,
            next_session_id: AtomicU64::new(1),
            connection_semaphore,
        })
    }

    /// Run the accept loop
    ///
    /// Returns once [`stop`](Self::stop) is called; the listening socket is
    /// closed on return. Fails with [`TransportError::NotListening`] if the
    /// server was already run or stopped.
    ///
    /// At `max_connections` the loop stops accepting until a connection
    /// finishes. Further clients wait in the listen backlog and are served
    /// in turn.
    pub async fn run(&self) -> Result<()> {
        let listener = self
            .listener
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
            .ok_or(TransportError::NotListening)?;

        let mut shutdown = self.shutdown.subscribe();

        loop {
            let permit = match self.connection_semaphore {
                Some(ref sem) => match Arc::clone(sem).try_acquire_owned() {
                    Ok(permit) => Some(permit),
                    Err(_) => {
                        self.metrics.on_throttle();
                        tracing::debug!(
                            limit = self.config.max_connections,
                            "Connection limit reached, waiting for a free slot"
                        );
                        tokio::select! {
                            _ = shutdown.wait_for(|stopped| *stopped) => break,
                            permit = Arc::clone(sem).acquire_owned() => match permit {
                                Ok(permit) => Some(permit),
                                Err(_) => break,
                            },
                        }
                    }
                },
                None => None,
            };

            tokio::select! {
                _ = shutdown.wait_for(|stopped| *stopped) => break,
                accepted = listener.accept() => match accepted {
                    Ok((socket, peer_addr)) => self.handle_connection(socket, peer_addr, permit),
                    Err(e) => {
                        tracing::error!(error = %TransportError::Accept(e), "Failed to accept connection");
                    }
                },
            }
        }

        tracing::info!(addr = %self.local_addr, "ONVIF server stopped");
        Ok(())
    }

    /// Run the server with graceful shutdown
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            _ = shutdown => {
                tracing::info!("Shutdown signal received");
                self.stop();
                Ok(())
            }
            result = self.run() => result,
        }
    }

    /// Stop accepting connections and close the listening socket
    ///
    /// Idempotent. In-flight connections run to completion.
    pub fn stop(&self) {
        self.shutdown.send_replace(true);
        // Not running yet: drop the listener here, otherwise `run` drops it
        self.listener
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
    }

    fn handle_connection(
        &self,
        socket: TcpStream,
        peer_addr: SocketAddr,
        permit: Option<OwnedSemaphorePermit>,
    ) {
        // Generate session ID
        let session_id = self.next_session_id.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            session_id = session_id,
            peer = %peer_addr,
            "New connection"
        );

        if self.config.tcp_nodelay {
            if let Err(e) = socket.set_nodelay(true) {
                tracing::error!(error = %e, "Failed to configure socket");
                return;
            }
        }

        self.metrics.on_accept();

        let config = Arc::clone(&self.config);
        let dispatcher = Arc::clone(&self.dispatcher);
        let metrics = Arc::clone(&self.metrics);

        tokio::spawn(async move {
            let _permit = permit;
            let mut connection = Connection::new(
                session_id,
                socket,
                peer_addr,
                config,
                dispatcher,
                Arc::clone(&metrics),
            );

            if let Err(e) = connection.run().await {
                tracing::debug!(
                    session_id = session_id,
                    error = %e,
                    "Connection error"
                );
            }

            metrics.on_close();
            tracing::debug!(session_id = session_id, "Connection closed");
        });
    }

    /// Address the listening socket is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Effective configuration (with the resolved port)
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Device state served by this instance
    pub fn device(&self) -> &DeviceState {
        &self.device
    }

    /// Snapshot of server statistics
    pub fn stats(&self) -> ServerStats {
        self.metrics.snapshot()
    }
}
