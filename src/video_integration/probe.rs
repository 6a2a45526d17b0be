//! Camera status probe strategies for the simulated backend

use crate::camera_roster::CameraStatus;
use crate::mock_generator::{choose, Draws};
use std::collections::HashMap;
use std::sync::Mutex;

/// Answers "what state is this camera in"
pub trait StatusProbe: Send + Sync {
    fn probe(&self, camera_id: &str) -> CameraStatus;
}

/// Uniformly random status (no diagnostic value)
pub struct RandomProbe {
    draws: Mutex<Box<dyn Draws>>,
}

impl RandomProbe {
    pub fn new(draws: Box<dyn Draws>) -> Self {
        Self {
            draws: Mutex::new(draws),
        }
    }
}

impl StatusProbe for RandomProbe {
    fn probe(&self, _camera_id: &str) -> CameraStatus {
        let mut draws = self.draws.lock().unwrap_or_else(|e| e.into_inner());
        choose(draws.as_mut())
    }
}

/// Per-camera fixed answers with a fallback
pub struct FixedProbe {
    statuses: HashMap<String, CameraStatus>,
    fallback: CameraStatus,
}

impl FixedProbe {
    pub fn new(fallback: CameraStatus) -> Self {
        Self {
            statuses: HashMap::new(),
            fallback,
        }
    }

    pub fn with(mut self, camera_id: &str, status: CameraStatus) -> Self {
        self.statuses.insert(camera_id.to_string(), status);
        self
    }
}

impl StatusProbe for FixedProbe {
    fn probe(&self, camera_id: &str) -> CameraStatus {
        self.statuses.get(camera_id).copied().unwrap_or(self.fallback)
    }
}
