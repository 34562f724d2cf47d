//! PTZ service responses
//!
//! There is no PTZ node behind these. Configuration, node and status are
//! constants, and move commands are acknowledged without effect.

const PAN_TILT_POSITION_SPACE: &str =
    "http://www.onvif.org/ver10/tptz/PanTiltSpaces/PositionGenericSpace";
const ZOOM_POSITION_SPACE: &str = "http://www.onvif.org/ver10/tptz/ZoomSpaces/PositionGenericSpace";
const PAN_TILT_TRANSLATION_SPACE: &str =
    "http://www.onvif.org/ver10/tptz/PanTiltSpaces/TranslationGenericSpace";
const ZOOM_TRANSLATION_SPACE: &str =
    "http://www.onvif.org/ver10/tptz/ZoomSpaces/TranslationGenericSpace";
const PAN_TILT_VELOCITY_SPACE: &str =
    "http://www.onvif.org/ver10/tptz/PanTiltSpaces/VelocityGenericSpace";
const ZOOM_VELOCITY_SPACE: &str = "http://www.onvif.org/ver10/tptz/ZoomSpaces/VelocityGenericSpace";
const PAN_TILT_SPEED_SPACE: &str =
    "http://www.onvif.org/ver10/tptz/PanTiltSpaces/GenericSpeedSpace";
const ZOOM_SPEED_SPACE: &str = "http://www.onvif.org/ver10/tptz/ZoomSpaces/ZoomGenericSpeedSpace";

/// `GetConfigurationsResponse` with the single `PTZConfig_1` configuration
pub fn configurations() -> String {
    format!(
        concat!(
            "<tptz:GetConfigurationsResponse>\n",
            "<tptz:PTZConfiguration token=\"PTZConfig_1\">\n",
            "<tptz:Name>PTZ Configuration</tptz:Name>\n",
            "<tptz:UseCount>1</tptz:UseCount>\n",
            "<tptz:NodeToken>PTZNode_1</tptz:NodeToken>\n",
            "<tptz:DefaultAbsolutePantTiltPositionSpace>{pt_pos}</tptz:DefaultAbsolutePantTiltPositionSpace>\n",
            "<tptz:DefaultAbsoluteZoomPositionSpace>{zoom_pos}</tptz:DefaultAbsoluteZoomPositionSpace>\n",
            "<tptz:DefaultRelativePanTiltTranslationSpace>{pt_trans}</tptz:DefaultRelativePanTiltTranslationSpace>\n",
            "<tptz:DefaultRelativeZoomTranslationSpace>{zoom_trans}</tptz:DefaultRelativeZoomTranslationSpace>\n",
            "<tptz:DefaultContinuousPanTiltVelocitySpace>{pt_vel}</tptz:DefaultContinuousPanTiltVelocitySpace>\n",
            "<tptz:DefaultContinuousZoomVelocitySpace>{zoom_vel}</tptz:DefaultContinuousZoomVelocitySpace>\n",
            "<tptz:DefaultPTZSpeed>\n",
            "<tptz:PanTilt x=\"1.0\" y=\"1.0\" space=\"{pt_speed}\"/>\n",
            "<tptz:Zoom x=\"1.0\" space=\"{zoom_speed}\"/>\n",
            "</tptz:DefaultPTZSpeed>\n",
            "<tptz:DefaultPTZTimeout>PT5S</tptz:DefaultPTZTimeout>\n",
            "<tptz:PanTiltLimits>\n",
            "<tptz:Range>\n",
            "<tptz:URI>{pt_pos}</tptz:URI>\n",
            "<tptz:XRange>\n",
            "<tptz:Min>-1.0</tptz:Min>\n",
            "<tptz:Max>1.0</tptz:Max>\n",
            "</tptz:XRange>\n",
            "<tptz:YRange>\n",
            "<tptz:Min>-1.0</tptz:Min>\n",
            "<tptz:Max>1.0</tptz:Max>\n",
            "</tptz:YRange>\n",
            "</tptz:Range>\n",
            "</tptz:PanTiltLimits>\n",
            "<tptz:ZoomLimits>\n",
            "<tptz:Range>\n",
            "<tptz:URI>{zoom_pos}</tptz:URI>\n",
            "<tptz:XRange>\n",
            "<tptz:Min>0.0</tptz:Min>\n",
            "<tptz:Max>1.0</tptz:Max>\n",
            "</tptz:XRange>\n",
            "</tptz:Range>\n",
            "</tptz:ZoomLimits>\n",
            "</tptz:PTZConfiguration>\n",
            "</tptz:GetConfigurationsResponse>"
        ),
        pt_pos = PAN_TILT_POSITION_SPACE,
        zoom_pos = ZOOM_POSITION_SPACE,
        pt_trans = PAN_TILT_TRANSLATION_SPACE,
        zoom_trans = ZOOM_TRANSLATION_SPACE,
        pt_vel = PAN_TILT_VELOCITY_SPACE,
        zoom_vel = ZOOM_VELOCITY_SPACE,
        pt_speed = PAN_TILT_SPEED_SPACE,
        zoom_speed = ZOOM_SPEED_SPACE,
    )
}

/// `GetNodesResponse` describing the single `PTZNode_1` node
pub fn nodes() -> String {
    format!(
        concat!(
            "<tptz:GetNodesResponse>\n",
            "<tptz:PTZNode token=\"PTZNode_1\" FixedHomePosition=\"false\">\n",
            "<tptz:Name>PTZ Node</tptz:Name>\n",
            "<tptz:SupportedPTZSpaces>\n",
            "<tptz:AbsolutePanTiltPositionSpace>\n",
            "<tptz:URI>{pt_pos}</tptz:URI>\n",
            "<tptz:XRange>\n",
            "<tptz:Min>-1.0</tptz:Min>\n",
            "<tptz:Max>1.0</tptz:Max>\n",
            "</tptz:XRange>\n",
            "<tptz:YRange>\n",
            "<tptz:Min>-1.0</tptz:Min>\n",
            "<tptz:Max>1.0</tptz:Max>\n",
            "</tptz:YRange>\n",
            "</tptz:AbsolutePanTiltPositionSpace>\n",
            "<tptz:AbsoluteZoomPositionSpace>\n",
            "<tptz:URI>{zoom_pos}</tptz:URI>\n",
            "<tptz:XRange>\n",
            "<tptz:Min>0.0</tptz:Min>\n",
            "<tptz:Max>1.0</tptz:Max>\n",
            "</tptz:XRange>\n",
            "</tptz:AbsoluteZoomPositionSpace>\n",
            "</tptz:SupportedPTZSpaces>\n",
            "<tptz:MaximumNumberOfPresets>16</tptz:MaximumNumberOfPresets>\n",
            "<tptz:HomeSupported>true</tptz:HomeSupported>\n",
            "</tptz:PTZNode>\n",
            "</tptz:GetNodesResponse>"
        ),
        pt_pos = PAN_TILT_POSITION_SPACE,
        zoom_pos = ZOOM_POSITION_SPACE,
    )
}

/// `GetStatusResponse`: parked at the origin, both axes idle
pub fn status() -> String {
    format!(
        concat!(
            "<tptz:GetStatusResponse>\n",
            "<tptz:PTZStatus>\n",
            "<tptz:Position>\n",
            "<tptz:PanTilt x=\"0.0\" y=\"0.0\" space=\"{pt_pos}\"/>\n",
            "<tptz:Zoom x=\"0.0\" space=\"{zoom_pos}\"/>\n",
            "</tptz:Position>\n",
            "<tptz:MoveStatus>\n",
            "<tptz:PanTilt>IDLE</tptz:PanTilt>\n",
            "<tptz:Zoom>IDLE</tptz:Zoom>\n",
            "</tptz:MoveStatus>\n",
            "<tptz:UtcTime>2024-01-01T12:00:00Z</tptz:UtcTime>\n",
            "</tptz:PTZStatus>\n",
            "</tptz:GetStatusResponse>"
        ),
        pt_pos = PAN_TILT_POSITION_SPACE,
        zoom_pos = ZOOM_POSITION_SPACE,
    )
}

/// Empty acknowledgement for a move or stop command
///
/// Nothing moves, so the position reported by [`status`] never changes.
pub fn acknowledge(operation: &str) -> String {
    format!(
        "<tptz:{op}Response>\n</tptz:{op}Response>",
        op = operation
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configurations() {
        let body = configurations();

        assert!(body.starts_with("<tptz:GetConfigurationsResponse>"));
        assert_eq!(body.matches("<tptz:PTZConfiguration ").count(), 1);
        assert!(body.contains("token=\"PTZConfig_1\""));
        assert!(body.contains("<tptz:DefaultPTZTimeout>PT5S</tptz:DefaultPTZTimeout>"));
        assert_eq!(body.matches(PAN_TILT_POSITION_SPACE).count(), 2);
    }

    #[test]
    fn test_nodes() {
        let body = nodes();

        assert!(body.starts_with("<tptz:GetNodesResponse>"));
        assert!(body.contains("<tptz:PTZNode token=\"PTZNode_1\" FixedHomePosition=\"false\">"));
        assert!(body.contains("<tptz:MaximumNumberOfPresets>16</tptz:MaximumNumberOfPresets>"));
    }

    #[test]
    fn test_status_is_idle_at_origin() {
        let body = status();

        assert!(body.contains("<tptz:PanTilt x=\"0.0\" y=\"0.0\""));
        assert_eq!(body.matches(">IDLE<").count(), 2);
        assert_eq!(body, status());
    }

    #[test]
    fn test_acknowledge() {
        assert_eq!(
            acknowledge("AbsoluteMove"),
            "<tptz:AbsoluteMoveResponse>\n</tptz:AbsoluteMoveResponse>"
        );
        assert_eq!(acknowledge("Stop"), "<tptz:StopResponse>\n</tptz:StopResponse>");
    }
}
