//! VideoIntegration - Video SDK boundary
//!
//! ## Responsibilities
//!
//! - Stream / snapshot locators per device
//! - PTZ control
//! - Device status probe
//! - Device registry (add / remove / list)
//!
//! Two backends implement [`VideoSdk`]: [`SimulatedSdk`] (no device I/O)
//! and [`IsapiSdk`] (HTTP device protocol). [`VideoIntegration`] picks one
//! from configuration.

pub mod isapi;
pub mod probe;
pub mod registry;
pub mod simulated;
pub mod types;

pub use isapi::IsapiSdk;
pub use probe::{FixedProbe, RandomProbe, StatusProbe};
pub use simulated::SimulatedSdk;
pub use types::*;

use crate::camera_roster::CameraStatus;
use crate::error::{Error, Result};
use std::str::FromStr;
use std::time::Duration;

/// Video SDK capability set
#[allow(async_fn_in_trait)]
pub trait VideoSdk {
    async fn initialize(&self) -> Result<bool>;
    async fn video_stream(&self, camera_id: &str, config: &StreamConfig) -> Result<String>;
    async fn stop_video_stream(&self, camera_id: &str) -> Result<bool>;
    async fn snapshot(&self, camera_id: &str) -> Result<String>;
    async fn control_ptz(&self, camera_id: &str, action: PtzAction, speed: u8) -> Result<bool>;
    async fn camera_status(&self, camera_id: &str) -> Result<CameraStatus>;
    async fn camera_list(&self) -> Result<Vec<DeviceEntry>>;
    async fn add_camera(&self, id: &str, config: DeviceConfig) -> Result<bool>;
    async fn remove_camera(&self, id: &str) -> Result<bool>;
}

/// Configured backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoBackend {
    #[default]
    Simulated,
    Isapi,
}

impl FromStr for VideoBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" => Ok(Self::Simulated),
            "isapi" => Ok(Self::Isapi),
            other => Err(Error::Config(format!(
                "VIDEO_BACKEND must be 'simulated' or 'isapi', got '{}'",
                other
            ))),
        }
    }
}

/// Backend selected at startup
pub enum VideoIntegration {
    Simulated(SimulatedSdk),
    Isapi(IsapiSdk),
}

impl VideoIntegration {
    /// Build the configured backend over the seed device list.
    ///
    /// `probe` is only used by the simulated backend.
    pub fn from_backend(
        backend: VideoBackend,
        timeout: Duration,
        probe: Box<dyn StatusProbe>,
    ) -> Self {
        match backend {
            VideoBackend::Simulated => Self::Simulated(SimulatedSdk::new(seed_devices(), probe)),
            VideoBackend::Isapi => Self::Isapi(IsapiSdk::new(seed_devices(), timeout)),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Simulated(_) => "simulated",
            Self::Isapi(_) => "isapi",
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $sdk:ident => $call:expr) => {
        match $self {
            VideoIntegration::Simulated($sdk) => $call,
            VideoIntegration::Isapi($sdk) => $call,
        }
    };
}

impl VideoSdk for VideoIntegration {
    async fn initialize(&self) -> Result<bool> {
        dispatch!(self, sdk => sdk.initialize().await)
    }

    async fn video_stream(&self, camera_id: &str, config: &StreamConfig) -> Result<String> {
        dispatch!(self, sdk => sdk.video_stream(camera_id, config).await)
    }

    async fn stop_video_stream(&self, camera_id: &str) -> Result<bool> {
        dispatch!(self, sdk => sdk.stop_video_stream(camera_id).await)
    }

    async fn snapshot(&self, camera_id: &str) -> Result<String> {
        dispatch!(self, sdk => sdk.snapshot(camera_id).await)
    }

    async fn control_ptz(&self, camera_id: &str, action: PtzAction, speed: u8) -> Result<bool> {
        dispatch!(self, sdk => sdk.control_ptz(camera_id, action, speed).await)
    }

    async fn camera_status(&self, camera_id: &str) -> Result<CameraStatus> {
        dispatch!(self, sdk => sdk.camera_status(camera_id).await)
    }

    async fn camera_list(&self) -> Result<Vec<DeviceEntry>> {
        dispatch!(self, sdk => sdk.camera_list().await)
    }

    async fn add_camera(&self, id: &str, config: DeviceConfig) -> Result<bool> {
        dispatch!(self, sdk => sdk.add_camera(id, config).await)
    }

    async fn remove_camera(&self, id: &str) -> Result<bool> {
        dispatch!(self, sdk => sdk.remove_camera(id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parses() {
        assert_eq!("ISAPI".parse::<VideoBackend>().unwrap(), VideoBackend::Isapi);
        assert_eq!("simulated".parse::<VideoBackend>().unwrap(), VideoBackend::Simulated);
        assert!(matches!("onvif".parse::<VideoBackend>(), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn configured_backend_is_selected() {
        let probe = || Box::new(FixedProbe::new(CameraStatus::Offline));
        let timeout = Duration::from_secs(1);

        let sim = VideoIntegration::from_backend(VideoBackend::Simulated, timeout, probe());
        assert_eq!(sim.backend_name(), "simulated");
        assert_eq!(sim.camera_status("1").await.unwrap(), CameraStatus::Offline);

        let isapi = VideoIntegration::from_backend(VideoBackend::Isapi, timeout, probe());
        assert_eq!(isapi.backend_name(), "isapi");
        assert_eq!(isapi.camera_list().await.unwrap().len(), 2);
    }
}
