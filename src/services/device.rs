//! Device management service responses

use crate::device::DeviceIdentity;
use crate::server::ServerConfig;
use crate::soap::envelope::escape;
use crate::soap::Service;

/// `GetDeviceInformationResponse`
pub fn device_information(identity: &DeviceIdentity) -> String {
    format!(
        concat!(
            "<tds:GetDeviceInformationResponse>\n",
            "<tds:Manufacturer>{manufacturer}</tds:Manufacturer>\n",
            "<tds:Model>{model}</tds:Model>\n",
            "<tds:FirmwareVersion>{firmware}</tds:FirmwareVersion>\n",
            "<tds:SerialNumber>{serial}</tds:SerialNumber>\n",
            "<tds:HardwareId>{hardware_id}</tds:HardwareId>\n",
            "</tds:GetDeviceInformationResponse>"
        ),
        manufacturer = escape(&identity.manufacturer),
        model = escape(&identity.model),
        firmware = escape(&identity.firmware_version),
        serial = escape(&identity.serial_number),
        hardware_id = escape(&identity.uuid),
    )
}

/// `GetCapabilitiesResponse`
///
/// Only TLS 1.2 is reported as supported; every other optional feature is off.
pub fn capabilities(config: &ServerConfig) -> String {
    format!(
        concat!(
            "<tds:GetCapabilitiesResponse>\n",
            "<tds:Capabilities>\n",
            "<tds:Device>\n",
            "<tds:XAddr>{device_xaddr}</tds:XAddr>\n",
            "<tds:Network>\n",
            "<tds:IPFilter>false</tds:IPFilter>\n",
            "<tds:ZeroConfiguration>false</tds:ZeroConfiguration>\n",
            "<tds:IPVersion6>false</tds:IPVersion6>\n",
            "<tds:DynDNS>false</tds:DynDNS>\n",
            "</tds:Network>\n",
            "<tds:System>\n",
            "<tds:DiscoveryResolve>false</tds:DiscoveryResolve>\n",
            "<tds:DiscoveryBye>false</tds:DiscoveryBye>\n",
            "<tds:RemoteDiscovery>false</tds:RemoteDiscovery>\n",
            "<tds:SystemBackup>false</tds:SystemBackup>\n",
            "<tds:SystemLogging>false</tds:SystemLogging>\n",
            "<tds:FirmwareUpgrade>false</tds:FirmwareUpgrade>\n",
            "</tds:System>\n",
            "<tds:IO>\n",
            "<tds:InputConnectors>0</tds:InputConnectors>\n",
            "<tds:RelayOutputs>0</tds:RelayOutputs>\n",
            "</tds:IO>\n",
            "<tds:Security>\n",
            "<tds:TLS1.1>false</tds:TLS1.1>\n",
            "<tds:TLS1.2>true</tds:TLS1.2>\n",
            "<tds:OnboardKeyGeneration>false</tds:OnboardKeyGeneration>\n",
            "<tds:AccessPolicyConfig>false</tds:AccessPolicyConfig>\n",
            "<tds:X.509Token>false</tds:X.509Token>\n",
            "<tds:SAMLToken>false</tds:SAMLToken>\n",
            "<tds:KerberosToken>false</tds:KerberosToken>\n",
            "<tds:RELToken>false</tds:RELToken>\n",
            "</tds:Security>\n",
            "</tds:Device>\n",
            "<tds:Media>\n",
            "<tds:XAddr>{media_xaddr}</tds:XAddr>\n",
            "<tds:StreamingCapabilities>\n",
            "<tds:RTPMulticast>false</tds:RTPMulticast>\n",
            "<tds:RTP_TCP>true</tds:RTP_TCP>\n",
            "<tds:RTP_RTSP_TCP>true</tds:RTP_RTSP_TCP>\n",
            "</tds:StreamingCapabilities>\n",
            "</tds:Media>\n",
            "<tds:PTZ>\n",
            "<tds:XAddr>{ptz_xaddr}</tds:XAddr>\n",
            "</tds:PTZ>\n",
            "</tds:Capabilities>\n",
            "</tds:GetCapabilitiesResponse>"
        ),
        device_xaddr = escape(&config.device_service_url()),
        media_xaddr = escape(&config.media_service_url()),
        ptz_xaddr = escape(&config.ptz_service_url()),
    )
}

/// `GetServicesResponse`, one entry per service at version 2.5
pub fn services(config: &ServerConfig) -> String {
    let mut body = String::from("<tds:GetServicesResponse>\n");

    for service in Service::ALL {
        let xaddr = match service {
            Service::Device => config.device_service_url(),
            Service::Media => config.media_service_url(),
            Service::Ptz => config.ptz_service_url(),
        };
        body.push_str(&format!(
            concat!(
                "<tds:Service>\n",
                "<tds:Namespace>{namespace}</tds:Namespace>\n",
                "<tds:XAddr>{xaddr}</tds:XAddr>\n",
                "<tds:Version>\n",
                "<tds:Major>2</tds:Major>\n",
                "<tds:Minor>5</tds:Minor>\n",
                "</tds:Version>\n",
                "</tds:Service>\n"
            ),
            namespace = service.namespace(),
            xaddr = escape(&xaddr),
        ));
    }

    body.push_str("</tds:GetServicesResponse>");
    body
}

/// `GetSystemDateAndTimeResponse`
///
/// Always reports 2024-01-01 12:00:00 UTC; the host clock is not read.
pub fn system_date_and_time() -> String {
    concat!(
        "<tds:GetSystemDateAndTimeResponse>\n",
        "<tds:SystemDateAndTime>\n",
        "<tds:DateTimeType>Manual</tds:DateTimeType>\n",
        "<tds:DaylightSavings>false</tds:DaylightSavings>\n",
        "<tds:TimeZone>\n",
        "<tds:TZ>UTC</tds:TZ>\n",
        "</tds:TimeZone>\n",
        "<tds:UTCDateTime>\n",
        "<tds:Time>\n",
        "<tds:Hour>12</tds:Hour>\n",
        "<tds:Minute>0</tds:Minute>\n",
        "<tds:Second>0</tds:Second>\n",
        "</tds:Time>\n",
        "<tds:Date>\n",
        "<tds:Year>2024</tds:Year>\n",
        "<tds:Month>1</tds:Month>\n",
        "<tds:Day>1</tds:Day>\n",
        "</tds:Date>\n",
        "</tds:UTCDateTime>\n",
        "</tds:SystemDateAndTime>\n",
        "</tds:GetSystemDateAndTimeResponse>"
    )
    .to_string()
}
