//! SOAP envelope handling
//!
//! ```text
//!   inbound bytes ──► request::parse_operation ──► Operation { ns, name }
//!                                                        │
//!                                              Action::from_operation
//!                                                        │
//!   body fragment ──► envelope::wrap ──► <SOAP-ENV:Envelope>...</SOAP-ENV:Envelope>
//! ```

pub mod action;
pub mod envelope;
pub mod request;

pub use action::Action;
pub use envelope::Fault;
pub use request::Operation;

/// SOAP 1.2 envelope namespace
pub const NS_SOAP_ENV: &str = "http://www.w3.org/2003/05/soap-envelope";

/// ONVIF device management service namespace
pub const NS_DEVICE: &str = "http://www.onvif.org/ver10/device/wsdl";

/// ONVIF media service namespace
pub const NS_MEDIA: &str = "http://www.onvif.org/ver10/media/wsdl";

/// ONVIF PTZ service namespace
pub const NS_PTZ: &str = "http://www.onvif.org/ver20/ptz/wsdl";

pub const SERVICE_PATH_DEVICE: &str = "/onvif/device_service";
pub const SERVICE_PATH_MEDIA: &str = "/onvif/media_service";
pub const SERVICE_PATH_PTZ: &str = "/onvif/ptz_service";

/// ONVIF services exposed by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Device,
    Media,
    Ptz,
}

impl Service {
    /// All services in advertised order
    pub const ALL: [Service; 3] = [Service::Device, Service::Media, Service::Ptz];

    /// WSDL namespace of the service
    pub fn namespace(self) -> &'static str {
        match self {
            Service::Device => NS_DEVICE,
            Service::Media => NS_MEDIA,
            Service::Ptz => NS_PTZ,
        }
    }

    /// Nominal HTTP path (advertised only, never enforced)
    pub fn path(self) -> &'static str {
        match self {
            Service::Device => SERVICE_PATH_DEVICE,
            Service::Media => SERVICE_PATH_MEDIA,
            Service::Ptz => SERVICE_PATH_PTZ,
        }
    }

    /// Namespace prefix declared on response envelopes
    pub fn prefix(self) -> &'static str {
        match self {
            Service::Device => "tds",
            Service::Media => "trt",
            Service::Ptz => "tptz",
        }
    }
}
