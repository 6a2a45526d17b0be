//! Camera roster type definitions

use crate::mock_generator::Closed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Camera operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraStatus {
    Online,
    Offline,
    Error,
}

impl Closed for CameraStatus {
    const ALL: &'static [Self] = &[Self::Online, Self::Offline, Self::Error];
}

/// Camera connection type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Ip,
    Analog,
    Ptz,
}

/// Camera record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub id: String,
    pub name: String,
    pub location: String,
    pub status: CameraStatus,
    #[serde(rename = "type")]
    pub connection: ConnectionType,
    pub resolution: String,
    pub fps: u32,
    #[serde(with = "crate::display_time")]
    pub last_update: DateTime<Utc>,
}

/// Partial camera update. The id is never updatable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraUpdate {
    #[serde(default)]
    pub status: Option<CameraStatus>,
    #[serde(default)]
    pub fps: Option<u32>,
}

impl CameraUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.fps.is_none()
    }
}

/// Accepted frame-rate range
pub const FPS_RANGE: std::ops::RangeInclusive<u32> = 1..=60;
