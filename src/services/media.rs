//! Media service responses

use crate::device::MediaProfile;
use crate::server::ServerConfig;
use crate::soap::envelope::escape;

/// Encoding advertised for every profile
pub const VIDEO_ENCODING: &str = "H264";

/// Encoder quality advertised for every profile
pub const VIDEO_QUALITY: u32 = 1;

/// GOP length advertised for every profile
pub const GOV_LENGTH: u32 = 30;

/// `GetProfilesResponse` with one `trt:Profiles` block per profile, in order
pub fn profiles(profiles: &[MediaProfile]) -> String {
    let mut body = String::from("<trt:GetProfilesResponse>\n");
    for profile in profiles {
        body.push_str(&profile_block(profile));
    }
    body.push_str("</trt:GetProfilesResponse>");
    body
}

fn profile_block(profile: &MediaProfile) -> String {
    format!(
        concat!(
            "<trt:Profiles token=\"{token}\" fixed=\"true\">\n",
            "<trt:Name>{name}</trt:Name>\n",
            "<trt:VideoSourceConfiguration token=\"VideoSource_1\" fixed=\"true\">\n",
            "<trt:Name>VideoSourceConfig</trt:Name>\n",
            "<trt:UseCount>2</trt:UseCount>\n",
            "<trt:SourceToken>VideoSource_1</trt:SourceToken>\n",
            "<trt:Bounds x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\"/>\n",
            "</trt:VideoSourceConfiguration>\n",
            "<trt:VideoEncoderConfiguration token=\"{encoder}\" fixed=\"true\">\n",
            "<trt:Name>VideoEncoderConfig</trt:Name>\n",
            "<trt:UseCount>1</trt:UseCount>\n",
            "<trt:Encoding>{encoding}</trt:Encoding>\n",
            "<trt:Resolution>\n",
            "<trt:Width>{width}</trt:Width>\n",
            "<trt:Height>{height}</trt:Height>\n",
            "</trt:Resolution>\n",
            "<trt:Quality>{quality}</trt:Quality>\n",
            "<trt:RateControl>\n",
            "<trt:FrameRateLimit>{framerate}</trt:FrameRateLimit>\n",
            "<trt:EncodingInterval>1</trt:EncodingInterval>\n",
            "<trt:BitrateLimit>{bitrate}</trt:BitrateLimit>\n",
            "</trt:RateControl>\n",
            "<trt:H264>\n",
            "<trt:GovLength>{gov_length}</trt:GovLength>\n",
            "<trt:H264Profile>Baseline</trt:H264Profile>\n",
            "</trt:H264>\n",
            "</trt:VideoEncoderConfiguration>\n",
            "</trt:Profiles>\n"
        ),
        token = escape(&profile.token),
        name = escape(&profile.name),
        encoder = escape(&profile.video_encoder_token),
        width = profile.width,
        height = profile.height,
        framerate = profile.framerate,
        bitrate = profile.bitrate,
        encoding = VIDEO_ENCODING,
        quality = VIDEO_QUALITY,
        gov_length = GOV_LENGTH,
    )
}

/// `GetVideoSourcesResponse` with the single `VideoSource_1` source
///
/// The source runs at the resolution and framerate of the first profile.
pub fn video_sources(profiles: &[MediaProfile]) -> String {
    let (width, height, framerate) = profiles
        .first()
        .map_or((0, 0, 0), |p| (p.width, p.height, p.framerate));

    format!(
        concat!(
            "<trt:GetVideoSourcesResponse>\n",
            "<trt:VideoSources token=\"VideoSource_1\">\n",
            "<trt:Framerate>{framerate}</trt:Framerate>\n",
            "<trt:Resolution>\n",
            "<trt:Width>{width}</trt:Width>\n",
            "<trt:Height>{height}</trt:Height>\n",
            "</trt:Resolution>\n",
            "</trt:VideoSources>\n",
            "</trt:GetVideoSourcesResponse>"
        ),
        framerate = framerate,
        width = width,
        height = height,
    )
}

/// `GetStreamUriResponse`
///
/// The URI is a fixed placeholder at `http_port + 1`, whatever profile the
/// request names. Nothing serves RTSP there unless a media server is run
/// alongside.
pub fn stream_uri(config: &ServerConfig) -> String {
    format!(
        concat!(
            "<trt:GetStreamUriResponse>\n",
            "<trt:MediaUri>\n",
            "<trt:Uri>{uri}</trt:Uri>\n",
            "<trt:InvalidAfterConnect>false</trt:InvalidAfterConnect>\n",
            "<trt:InvalidAfterReboot>false</trt:InvalidAfterReboot>\n",
            "<trt:Timeout>PT60S</trt:Timeout>\n",
            "</trt:MediaUri>\n",
            "</trt:GetStreamUriResponse>"
        ),
        uri = escape(&config.stream_uri()),
    )
}
