//! Video integration type definitions

use serde::{Deserialize, Serialize};

/// Device connection parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub ip: String,
    pub port: u16,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub channel: u32,
}

impl DeviceConfig {
    /// Main-stream RTSP locator
    pub fn stream_locator(&self) -> String {
        format!(
            "rtsp://{}:{}@{}:{}/Streaming/Channels/{}01",
            self.username, self.password, self.ip, self.port, self.channel
        )
    }

    /// Still image locator
    pub fn snapshot_locator(&self) -> String {
        format!(
            "http://{}:{}/ISAPI/Streaming/channels/{}01/picture",
            self.ip, self.port, self.channel
        )
    }

    /// Base URL of the device's HTTP API
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.ip, self.port)
    }
}

/// Registered device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    pub id: String,
    pub config: DeviceConfig,
}

/// Requested stream quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamQuality {
    High,
    Medium,
    Low,
}

/// Stream parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub quality: StreamQuality,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: 30,
            quality: StreamQuality::High,
        }
    }
}

/// PTZ command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PtzAction {
    Up,
    Down,
    Left,
    Right,
    ZoomIn,
    ZoomOut,
    Stop,
}

impl PtzAction {
    /// Unit (pan, tilt, zoom) direction
    pub fn vector(&self) -> (i32, i32, i32) {
        match self {
            Self::Up => (0, 1, 0),
            Self::Down => (0, -1, 0),
            Self::Left => (-1, 0, 0),
            Self::Right => (1, 0, 0),
            Self::ZoomIn => (0, 0, 1),
            Self::ZoomOut => (0, 0, -1),
            Self::Stop => (0, 0, 0),
        }
    }
}

/// Device PTZ speed range
pub const PTZ_SPEED_RANGE: std::ops::RangeInclusive<u8> = 1..=7;

/// Round and clamp a requested speed into [`PTZ_SPEED_RANGE`]. NaN maps to the minimum.
pub fn clamp_speed(speed: f64) -> u8 {
    let (min, max) = (*PTZ_SPEED_RANGE.start(), *PTZ_SPEED_RANGE.end());
    if speed.is_nan() {
        return min;
    }
    speed.round().clamp(f64::from(min), f64::from(max)) as u8
}

fn default_speed() -> f64 {
    1.0
}

/// PTZ request body. `speed` accepts any number and is clamped on use.
#[derive(Debug, Clone, Deserialize)]
pub struct PtzRequest {
    pub action: PtzAction,
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl PtzRequest {
    pub fn clamped_speed(&self) -> u8 {
        clamp_speed(self.speed)
    }
}

/// Add-device request body
#[derive(Debug, Clone, Deserialize)]
pub struct AddDeviceRequest {
    pub id: String,
    pub config: DeviceConfig,
}

/// Operation result flag
#[derive(Debug, Clone, Serialize)]
pub struct OperationResult {
    pub ok: bool,
}

/// Devices present at startup
pub fn seed_devices() -> Vec<DeviceEntry> {
    [("1", "192.168.1.100"), ("2", "192.168.1.101")]
        .into_iter()
        .map(|(id, ip)| DeviceEntry {
            id: id.to_string(),
            config: DeviceConfig {
                ip: ip.to_string(),
                port: 8000,
                username: "admin".to_string(),
                password: "admin123".to_string(),
                channel: 1,
            },
        })
        .collect()
}
