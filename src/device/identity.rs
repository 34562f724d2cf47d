//! Device identity

/// Identity reported by `GetDeviceInformation`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// Device UUID, reported as the hardware id
    pub uuid: String,

    /// Friendly name
    pub name: String,

    pub manufacturer: String,

    pub model: String,

    pub serial_number: String,

    pub firmware_version: String,
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self {
            uuid: "urn:uuid:12345678-1234-1234-1234-123456789012".into(),
            name: "ONVIF Camera".into(),
            manufacturer: "Sample Manufacturer".into(),
            model: "Sample Model".into(),
            serial_number: "123456789".into(),
            firmware_version: "1.0.0".into(),
        }
    }
}

impl DeviceIdentity {
    /// Set the manufacturer
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the serial number
    pub fn serial_number(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = serial.into();
        self
    }

    /// Set the firmware version
    pub fn firmware_version(mut self, version: impl Into<String>) -> Self {
        self.firmware_version = version.into();
        self
    }

    /// Set the friendly name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_identity() {
        let identity = DeviceIdentity::default();

        assert_eq!(identity.manufacturer, "Sample Manufacturer");
        assert_eq!(identity.serial_number, "123456789");
        assert!(identity.uuid.starts_with("urn:uuid:"));
    }

    #[test]
    fn test_builder_chaining() {
        let identity = DeviceIdentity::default()
            .manufacturer("Acme")
            .model("Cam 3000")
            .serial_number("SN-1")
            .firmware_version("2.1.0");

        assert_eq!(identity.manufacturer, "Acme");
        assert_eq!(identity.model, "Cam 3000");
        assert_eq!(identity.serial_number, "SN-1");
        assert_eq!(identity.firmware_version, "2.1.0");
        assert_eq!(identity.name, "ONVIF Camera");
    }
}
