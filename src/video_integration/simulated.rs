//! Simulated video SDK
//!
//! No device I/O. Locators are built from the registered config and the
//! status answer comes from an injected [`StatusProbe`].

use super::probe::StatusProbe;
use super::registry::DeviceRegistry;
use super::types::{clamp_speed, DeviceConfig, DeviceEntry, PtzAction, StreamConfig};
use super::VideoSdk;
use crate::camera_roster::CameraStatus;
use crate::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct SimulatedSdk {
    registry: DeviceRegistry,
    probe: Box<dyn StatusProbe>,
    initialized: AtomicBool,
}

impl SimulatedSdk {
    pub fn new(devices: Vec<DeviceEntry>, probe: Box<dyn StatusProbe>) -> Self {
        Self {
            registry: DeviceRegistry::new(devices),
            probe,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Relaxed)
    }

    pub async fn is_streaming(&self, camera_id: &str) -> bool {
        self.registry.is_streaming(camera_id).await
    }
}

impl VideoSdk for SimulatedSdk {
    async fn initialize(&self) -> Result<bool> {
        self.initialized.store(true, Ordering::Relaxed);
        tracing::info!("Simulated video SDK initialized");
        Ok(true)
    }

    async fn video_stream(&self, camera_id: &str, config: &StreamConfig) -> Result<String> {
        let device = self.registry.require(camera_id).await?;
        self.registry.mark_streaming(camera_id).await;

        tracing::info!(
            camera_id = %camera_id,
            width = config.width,
            height = config.height,
            fps = config.fps,
            quality = ?config.quality,
            "Video stream started (simulated)"
        );

        Ok(device.stream_locator())
    }

    async fn stop_video_stream(&self, camera_id: &str) -> Result<bool> {
        let was_active = self.registry.clear_streaming(camera_id).await;
        tracing::info!(camera_id = %camera_id, was_active, "Video stream stopped (simulated)");
        Ok(true)
    }

    async fn snapshot(&self, camera_id: &str) -> Result<String> {
        let device = self.registry.require(camera_id).await?;
        tracing::debug!(camera_id = %camera_id, "Snapshot requested (simulated)");
        Ok(device.snapshot_locator())
    }

    async fn control_ptz(&self, camera_id: &str, action: PtzAction, speed: u8) -> Result<bool> {
        if let Err(e) = self.registry.require(camera_id).await {
            tracing::warn!(camera_id = %camera_id, error = %e, "PTZ command rejected");
            return Ok(false);
        }
        tracing::info!(
            camera_id = %camera_id,
            action = ?action,
            speed = clamp_speed(f64::from(speed)),
            "PTZ command accepted (simulated)"
        );
        Ok(true)
    }

    async fn camera_status(&self, camera_id: &str) -> Result<CameraStatus> {
        if let Err(e) = self.registry.require(camera_id).await {
            tracing::warn!(camera_id = %camera_id, error = %e, "Status probe failed");
            return Ok(CameraStatus::Error);
        }
        let status = self.probe.probe(camera_id);
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
