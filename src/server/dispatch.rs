//! Action dispatcher
//!
//! Maps a raw request to exactly one response envelope. Routing prefers the
//! qualified name of the first element under the SOAP Body; payloads that do
//! not parse as an envelope (truncated reads, non-XML) fall back to scanning
//! the raw text for action markers in priority order. Anything unresolved is
//! answered with a `SOAP-ENV:Receiver` fault, so dispatch never fails.

use std::sync::Arc;

use crate::device::DeviceState;
use crate::server::config::ServerConfig;
use crate::services::{device, media, ptz};
use crate::soap::{envelope, request, Action, Fault};

/// A routed response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    /// Action answered, `None` for a fault
    pub action: Option<Action>,
    /// Complete SOAP envelope
    pub envelope: String,
}

/// Routes requests to response builders
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: Arc<ServerConfig>,
    device: Arc<DeviceState>,
}

impl Dispatcher {
    pub fn new(config: Arc<ServerConfig>, device: Arc<DeviceState>) -> Self {
        Self { config, device }
    }

    /// Resolve the action requested by a raw HTTP request
    pub fn resolve(raw: &[u8]) -> Option<Action> {
        match request::parse_operation(request::http_body(raw)) {
            Ok(Some(op)) => {
                let action = Action::from_operation(&op);
                if action.is_none() {
                    tracing::debug!(
                        operation = %op.name,
                        namespace = op.namespace.as_deref().unwrap_or(""),
                        "Unsupported operation"
                    );
                }
                action
            }
            Ok(None) => {
                tracing::debug!("Empty SOAP body");
                None
            }
            Err(e) => {
                tracing::trace!(error = %e, "Not a SOAP envelope, scanning for action markers");
                Action::scan(&String::from_utf8_lossy(raw))
            }
        }
    }

    /// Produce the response envelope for a raw request
    pub fn dispatch(&self, raw: &[u8]) -> Dispatched {
        let action = Self::resolve(raw);
        Dispatched {
            action,
            envelope: self.respond(action),
        }
    }

    /// Build the envelope for a resolved action, or the fault for `None`
    pub fn respond(&self, action: Option<Action>) -> String {
        match action {
            Some(action) => envelope::wrap(&self.body(action)),
            None => Fault::not_implemented().to_envelope(),
        }
    }

    fn body(&self, action: Action) -> String {
        match action {
            Action::GetDeviceInformation => device::device_information(self.device.identity()),
            Action::GetCapabilities => device::capabilities(&self.config),
            Action::GetServices => device::services(&self.config),
            Action::GetSystemDateAndTime => device::system_date_and_time(),
            Action::GetProfiles => media::profiles(self.device.profiles()),
            Action::GetStreamUri => media::stream_uri(&self.config),
            Action::GetVideoSources => media::video_sources(self.device.profiles()),
            Action::GetConfigurations => ptz::configurations(),
            Action::GetNodes => ptz::nodes(),
            Action::GetStatus => ptz::status(),
            Action::AbsoluteMove
            | Action::RelativeMove
            | Action::ContinuousMove
            | Action::Stop => ptz::acknowledge(action.name()),
        }
    }
}
