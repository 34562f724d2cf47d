//! Supported SOAP actions

use super::{Operation, Service};

/// An ONVIF operation the simulator answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GetDeviceInformation,
    GetCapabilities,
    GetProfiles,
    GetStreamUri,
    GetSystemDateAndTime,
    /// PTZ `GetConfigurations`
    GetConfigurations,
    GetServices,
    GetVideoSources,
    GetNodes,
    GetStatus,
    AbsoluteMove,
    RelativeMove,
    ContinuousMove,
    /// PTZ `Stop`
    Stop,
}

impl Action {
    /// All actions in routing priority order
    pub const ALL: [Action; 14] = [
        Action::GetDeviceInformation,
        Action::GetCapabilities,
        Action::GetProfiles,
        Action::GetStreamUri,
        Action::GetSystemDateAndTime,
        Action::GetConfigurations,
        Action::GetServices,
        Action::GetVideoSources,
        Action::GetNodes,
        Action::GetStatus,
        Action::AbsoluteMove,
        Action::RelativeMove,
        Action::ContinuousMove,
        Action::Stop,
    ];

    /// Actions recognised by raw-text scanning, in priority order
    ///
    /// Everything else is only reachable as a SOAP Body element; names such
    /// as `Stop` are too generic to match on substrings.
    pub const MARKERS: [Action; 6] = [
        Action::GetDeviceInformation,
        Action::GetCapabilities,
        Action::GetProfiles,
        Action::GetStreamUri,
        Action::GetSystemDateAndTime,
        Action::GetConfigurations,
    ];

    /// Operation element local name
    pub fn name(self) -> &'static str {
        match self {
            Action::GetDeviceInformation => "GetDeviceInformation",
            Action::GetCapabilities => "GetCapabilities",
            Action::GetProfiles => "GetProfiles",
            Action::GetStreamUri => "GetStreamUri",
            Action::GetSystemDateAndTime => "GetSystemDateAndTime",
            Action::GetConfigurations => "GetConfigurations",
            Action::GetServices => "GetServices",
            Action::GetVideoSources => "GetVideoSources",
            Action::GetNodes => "GetNodes",
            Action::GetStatus => "GetStatus",
            Action::AbsoluteMove => "AbsoluteMove",
            Action::RelativeMove => "RelativeMove",
            Action::ContinuousMove => "ContinuousMove",
            Action::Stop => "Stop",
        }
    }

    /// Service the action belongs to
    pub fn service(self) -> Service {
        match self {
            Action::GetDeviceInformation
            | Action::GetCapabilities
            | Action::GetSystemDateAndTime
            | Action::GetServices => Service::Device,
            Action::GetProfiles | Action::GetStreamUri | Action::GetVideoSources => {
                Service::Media
            }
            Action::GetConfigurations
            | Action::GetNodes
            | Action::GetStatus
            | Action::AbsoluteMove
            | Action::RelativeMove
            | Action::ContinuousMove
            | Action::Stop => Service::Ptz,
        }
    }

    /// Qualified name of the response root element, e.g. `tds:GetCapabilitiesResponse`
    pub fn response_element(self) -> String {
        format!("{}:{}Response", self.service().prefix(), self.name())
    }

    /// Resolve the operation found under the SOAP Body
    ///
    /// The local name must match exactly. A bound namespace must be the
    /// action's service namespace; an unbound one is accepted.
    pub fn from_operation(op: &Operation) -> Option<Self> {
        Self::ALL.into_iter().find(|action| {
            action.name() == op.name
                && op
                    .namespace
                    .as_deref()
                    .map_or(true, |ns| ns == action.service().namespace())
        })
    }

    /// Find the first marker action whose name occurs anywhere in `text`
    ///
    /// Used for payloads that do not parse as a SOAP envelope.
    pub fn scan(text: &str) -> Option<Self> {
        Self::MARKERS
            .into_iter()
            .find(|action| text.contains(action.name()))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
