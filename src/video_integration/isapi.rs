//! ISAPI video SDK
//!
//! Device-protocol backend talking HTTP to the camera's ISAPI endpoints.
//! Streams are consumed by the player directly from the RTSP locator, so
//! starting a stream only records it.

use super::registry::DeviceRegistry;
use super::types::{
    clamp_speed, DeviceConfig, DeviceEntry, PtzAction, StreamConfig, PTZ_SPEED_RANGE,
};
use super::VideoSdk;
use crate::camera_roster::CameraStatus;
use crate::error::Result;
use reqwest::Client;
use std::time::Duration;

/// Max ISAPI pan/tilt/zoom magnitude
const PTZ_MAGNITUDE: i32 = 100;

pub struct IsapiSdk {
    client: Client,
    registry: DeviceRegistry,
}

impl IsapiSdk {
    pub fn new(devices: Vec<DeviceEntry>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            registry: DeviceRegistry::new(devices),
        }
    }
}

/// `PTZData` body for a continuous move (all zero = stop)
pub fn ptz_body(action: PtzAction, speed: u8) -> String {
    let speed = i32::from(clamp_speed(f64::from(speed)));
    let scale = |unit: i32| unit * speed * PTZ_MAGNITUDE / *PTZ_SPEED_RANGE.end() as i32;
    let (pan, tilt, zoom) = action.vector();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<PTZData><pan>{}</pan><tilt>{}</tilt><zoom>{}</zoom></PTZData>",
        scale(pan),
        scale(tilt),
        scale(zoom)
    )
}

/// Map a device-info probe outcome to a camera status
pub fn status_from_probe(
    outcome: std::result::Result<reqwest::StatusCode, &reqwest::Error>,
) -> CameraStatus {
    match outcome {
        Ok(status) if status.is_success() => CameraStatus::Online,
        Ok(_) => CameraStatus::Error,
        Err(e) if e.is_connect() || e.is_timeout() => CameraStatus::Offline,
        Err(_) => CameraStatus::Error,
    }
}

impl VideoSdk for IsapiSdk {
    async fn initialize(&self) -> Result<bool> {
        let devices = self.registry.list().await;
        tracing::info!(device_count = devices.len(), "ISAPI video SDK initialized");
        Ok(true)
    }

    async fn video_stream(&self, camera_id: &str, config: &StreamConfig) -> Result<String> {
        let device = self.registry.require(camera_id).await?;
        self.registry.mark_streaming(camera_id).await;

        tracing::info!(
            camera_id = %camera_id,
            ip = %device.ip,
            fps = config.fps,
            quality = ?config.quality,
            "Video stream started"
        );

        Ok(device.stream_locator())
    }

    async fn stop_video_stream(&self, camera_id: &str) -> Result<bool> {
        let was_active = self.registry.clear_streaming(camera_id).await;
        tracing::info!(camera_id = %camera_id, was_active, "Video stream stopped");
        Ok(true)
    }

    async fn snapshot(&self, camera_id: &str) -> Result<String> {
        let device = self.registry.require(camera_id).await?;
        Ok(device.snapshot_locator())
    }

    /// `false` when the device is unknown, unreachable or rejects the command
    async fn control_ptz(&self, camera_id: &str, action: PtzAction, speed: u8) -> Result<bool> {
        let device = match self.registry.require(camera_id).await {
            Ok(device) => device,
            Err(e) => {
                tracing::warn!(camera_id = %camera_id, error = %e, "PTZ command rejected");
                return Ok(false);
            }
        };
        let url = format!(
            "{}/ISAPI/PTZCtrl/channels/{}/continuous",
            device.base_url(),
            device.channel
        );

        let resp = match self
            .client
            .put(&url)
            .basic_auth(&device.username, Some(&device.password))
            .header("Content-Type", "application/xml")
            .body(ptz_body(action, speed))
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(camera_id = %camera_id, error = %e, "PTZ request failed");
                return Ok(false);
            }
        };

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(
                camera_id = %camera_id,
                status = %status,
                body = %body,
                "PTZ command rejected by device"
            );
            return Ok(false);
        }

        tracing::info!(camera_id = %camera_id, action = ?action, speed, "PTZ command sent");
        Ok(true)
    }

    /// Unknown devices report `Error`
    async fn camera_status(&self, camera_id: &str) -> Result<CameraStatus> {
        let device = match self.registry.require(camera_id).await {
            Ok(device) => device,
            Err(e) => {
                tracing::warn!(camera_id = %camera_id, error = %e, "Status probe failed");
                return Ok(CameraStatus::Error);
            }
        };
        let url = format!("{}/ISAPI/System/deviceInfo", device.base_url());

        let result = self
            .client
            .get(&url)
            .basic_auth(&device.username, Some(&device.password))
            .send()
            .await;

        let status = match &result {
            Ok(resp) => status_from_probe(Ok(resp.status())),
            Err(e) => {
                tracing::warn!(camera_id = %camera_id, error = %e, "Device probe failed");
                status_from_probe(Err(e))
            }
        };

        tracing::debug!(camera_id = %camera_id, status = ?status, "Camera status probed");
        Ok(status)
    }

    async fn camera_list(&self) -> Result<Vec<DeviceEntry>> {
        Ok(self.registry.list().await)
    }

    async fn add_camera(&self, id: &str, config: DeviceConfig) -> Result<bool> {
        self.registry.insert(id, config).await?;
        tracing::info!(device_id = %id, "Device added");
        Ok(true)
    }

    async fn remove_camera(&self, id: &str) -> Result<bool> {
        let removed = self.registry.remove(id).await;
        tracing::info!(device_id = %id, removed, "Device removed");
        Ok(removed)
    }
}
