//! Device state
//!
//! Identity and media profiles are built once at startup and shared
//! read-only (behind an `Arc`) by every connection task. There is no
//! mutation path after construction, so no locking is involved.

pub mod identity;
pub mod profile;

use std::collections::HashSet;

pub use identity::DeviceIdentity;
pub use profile::MediaProfile;

use crate::error::{Error, Result};

/// Immutable device state answered from by the response builders
#[derive(Debug, Clone)]
pub struct DeviceState {
    identity: DeviceIdentity,
    profiles: Vec<MediaProfile>,
}

impl DeviceState {
    /// Create device state from an identity and an ordered profile list
    ///
    /// Fails if the list is empty or two profiles share a token.
    pub fn new(identity: DeviceIdentity, profiles: Vec<MediaProfile>) -> Result<Self> {
        if profiles.is_empty() {
            return Err(Error::Config("at least one media profile is required".into()));
        }

        let mut seen = HashSet::with_capacity(profiles.len());
        for profile in &profiles {
            if !seen.insert(profile.token.as_str()) {
                return Err(Error::Config(format!(
                    "duplicate media profile token: {}",
                    profile.token
                )));
            }
        }

        Ok(Self { identity, profiles })
    }

    /// Device identity
    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    /// Media profiles in advertised order
    pub fn profiles(&self) -> &[MediaProfile] {
        &self.profiles
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            identity: DeviceIdentity::default(),
            profiles: MediaProfile::defaults(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = DeviceState::default();

        assert_eq!(state.profiles().len(), 2);
        assert_eq!(state.identity().model, "Sample Model");
        assert_eq!(state.profiles()[0].token, "Profile_1");
        assert_eq!(state.profiles()[1].token, "Profile_2");
    }

    #[test]
    fn test_duplicate_tokens_rejected() {
        let profiles = vec![MediaProfile::main_stream(), MediaProfile::main_stream()];
        let result = DeviceState::new(DeviceIdentity::default(), profiles);

        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("Profile_1")));
    }

    #[test]
    fn test_empty_profiles_rejected() {
        let result = DeviceState::new(DeviceIdentity::default(), Vec::new());

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_custom_order_preserved() {
        let profiles = vec![MediaProfile::sub_stream(), MediaProfile::main_stream()];
        let state = DeviceState::new(DeviceIdentity::default(), profiles).unwrap();

        assert_eq!(state.profiles()[0].token, "Profile_2");
        assert_eq!(state.profiles()[1].token, "Profile_1");
    }
}
