//! Media profiles
//!
//! A profile bundles the encoder parameters of one stream variant. The
//! camera exposes a main stream and a sub stream.

/// One stream variant advertised by `GetProfiles`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaProfile {
    /// Unique profile token
    pub token: String,

    /// Display name
    pub name: String,

    /// Video encoder configuration token
    pub video_encoder_token: String,

    /// Audio encoder configuration token
    pub audio_encoder_token: String,

    pub width: u32,

    pub height: u32,

    /// Frames per second
    pub framerate: u32,

    /// Bits per second
    pub bitrate: u32,
}

impl MediaProfile {
    /// Create a profile with the given token and name and no resolution set
    pub fn new(token: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            name: name.into(),
            video_encoder_token: String::new(),
            audio_encoder_token: String::new(),
            width: 0,
            height: 0,
            framerate: 0,
            bitrate: 0,
        }
    }

    /// Set encoder configuration tokens
    pub fn encoders(mut self, video: impl Into<String>, audio: impl Into<String>) -> Self {
        self.video_encoder_token = video.into();
        self.audio_encoder_token = audio.into();
        self
    }

    /// Set resolution
    pub fn resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set framerate limit
    pub fn framerate(mut self, fps: u32) -> Self {
        self.framerate = fps;
        self
    }

    /// Set bitrate limit
    pub fn bitrate(mut self, bps: u32) -> Self {
        self.bitrate = bps;
        self
    }

    /// 1080p30 main stream
    pub fn main_stream() -> Self {
        Self::new("Profile_1", "MainStream")
            .encoders("VideoEncoder_1", "AudioEncoder_1")
            .resolution(1920, 1080)
            .framerate(30)
            .bitrate(4_000_000)
    }

    /// VGA 15 fps sub stream
    pub fn sub_stream() -> Self {
        Self::new("Profile_2", "SubStream")
            .encoders("VideoEncoder_2", "AudioEncoder_2")
            .resolution(640, 480)
            .framerate(15)
            .bitrate(1_000_000)
    }

    /// Built-in profiles, main stream first
    pub fn defaults() -> Vec<Self> {
        vec![Self::main_stream(), Self::sub_stream()]
    }
}
