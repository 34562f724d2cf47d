//! ONVIF server implementation
//!
//! ```text
//!   OnvifServer::run ── accept ──► tokio::spawn(Connection::run)
//!                                        │ single bounded read
//!                                        ▼
//!                                  Dispatcher::dispatch ──► services::* ──► soap::envelope::wrap
//!                                        │
//!                                        ▼
//!                                  HTTP/1.1 200 + envelope, close
//! ```

pub mod config;
pub mod connection;
pub mod dispatch;
pub mod listener;

pub use config::ServerConfig;
pub use dispatch::{Dispatched, Dispatcher};
pub use listener::OnvifServer;
