//! ONVIF network camera simulator
//!
//! Answers ONVIF device, media and PTZ SOAP requests over plain HTTP so that
//! client software can be exercised without camera hardware. Responses are
//! built from an immutable [`DeviceState`]; nothing is streamed, moved or
//! authenticated.
//!
//! # Example
//! ```no_run
//! use onvif_sim::{DeviceState, OnvifServer, ServerConfig};
//!
//! # async fn example() -> onvif_sim::Result<()> {
//! let server = OnvifServer::start(ServerConfig::with_port(8080), DeviceState::default())?;
//! server.run_until(async {
//!     let _ = tokio::signal::ctrl_c().await;
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod device;
pub mod error;
pub mod server;
pub mod services;
pub mod session;
pub mod soap;
pub mod stats;

pub use device::{DeviceIdentity, DeviceState, MediaProfile};
pub use error::{Error, Result};
pub use server::{OnvifServer, ServerConfig};
pub use soap::Action;
