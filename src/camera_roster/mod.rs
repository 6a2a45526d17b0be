//! CameraRoster - Authoritative camera records
//!
//! ## Responsibilities
//!
//! - Camera inventory seeded once at startup
//! - Status / frame-rate updates with last-update refresh
//!
//! Ids are assigned at seeding and never change. Records are never removed.

mod seed;
mod types;

pub use seed::seed_cameras;
pub use types::*;

use crate::error::{Error, Result};
use chrono::Utc;
use tokio::sync::RwLock;

/// Camera roster instance
pub struct CameraRoster {
    cameras: RwLock<Vec<Camera>>,
}

impl CameraRoster {
    /// Create roster from the fixed seed list
    pub fn new() -> Self {
        Self::with_cameras(seed_cameras())
    }

    /// Create roster from explicit records
    pub fn with_cameras(cameras: Vec<Camera>) -> Self {
        Self {
            cameras: RwLock::new(cameras),
        }
    }

    /// All cameras in roster order
    pub async fn list(&self) -> Vec<Camera> {
        self.cameras.read().await.clone()
    }

    /// One camera by id
    pub async fn get(&self, camera_id: &str) -> Option<Camera> {
        self.cameras
            .read()
            .await
            .iter()
            .find(|c| c.id == camera_id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.cameras.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cameras.read().await.is_empty()
    }

    /// Apply a partial update and return the updated record.
    ///
    /// Unknown ids fail with `NotFound` and leave the roster untouched.
    /// `last_update` is refreshed whenever the update carries a field and
    /// never moves backwards.
    pub async fn update(&self, camera_id: &str, update: CameraUpdate) -> Result<Camera> {
        let mut cameras = self.cameras.write().await;
        let camera = cameras
            .iter_mut()
            .find(|c| c.id == camera_id)
            .ok_or_else(|| Error::NotFound(format!("Camera {} not found", camera_id)))?;

        if let Some(fps) = update.fps {
            if !FPS_RANGE.contains(&fps) {
                return Err(Error::Validation(format!(
                    "fps must be within {}..={}, got {}",
                    FPS_RANGE.start(),
                    FPS_RANGE.end(),
                    fps
                )));
            }
        }

        if update.is_empty() {
            return Ok(camera.clone());
        }

        if let Some(status) = update.status {
            camera.status = status;
        }
        if let Some(fps) = update.fps {
            camera.fps = fps;
        }
        let now = crate::display_time::truncate_seconds(Utc::now());
        camera.last_update = now.max(camera.last_update);

        tracing::info!(
            camera_id = %camera_id,
            status = ?camera.status,
            fps = camera.fps,
            "Camera updated"
        );

        Ok(camera.clone())
    }
}

impl Default for CameraRoster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn seeded_with_eight_unique_ids() {
        let roster = CameraRoster::new();
        let cameras = roster.list().await;
        assert_eq!(cameras.len(), 8);

        let ids: std::collections::HashSet<_> = cameras.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 8);
    }

    #[tokio::test]
    async fn status_update_leaves_other_fields() {
        let roster = CameraRoster::new();
        let before = roster.get("4").await.unwrap();

        let after = roster
            .update(
                "4",
                CameraUpdate {
                    status: Some(CameraStatus::Online),
                    fps: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(after.status, CameraStatus::Online);
        assert_eq!(after.id, before.id);
        assert_eq!(after.name, before.name);
        assert_eq!(after.location, before.location);
        assert_eq!(after.resolution, before.resolution);
        assert_eq!(after.fps, before.fps);
        assert!(after.last_update >= before.last_update);
        assert_eq!(roster.get("4").await.unwrap(), after);
    }

    #[tokio::test]
    async fn last_update_never_moves_backwards() {
        let mut camera = seed_cameras().remove(0);
        let future = Utc::now() + Duration::days(365);
        camera.last_update = crate::display_time::truncate_seconds(future);
        let roster = CameraRoster::with_cameras(vec![camera.clone()]);

        let after = roster
            .update(
                &camera.id,
                CameraUpdate {
                    status: None,
                    fps: Some(25),
                },
            )
            .await
            .unwrap();

        assert_eq!(after.last_update, camera.last_update);
        assert_eq!(after.fps, 25);
    }

    #[tokio::test]
    async fn unknown_camera_is_not_found_and_roster_unchanged() {
        let roster = CameraRoster::new();
        let before = roster.list().await;

        let err = roster
            .update(
                "99",
                CameraUpdate {
                    status: Some(CameraStatus::Error),
                    fps: Some(30),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(roster.len().await, 8);
        assert_eq!(roster.list().await, before);
    }

    #[tokio::test]
    async fn invalid_fps_rejected_without_change() {
        let roster = CameraRoster::new();
        let before = roster.get("1").await.unwrap();

        let err = roster
            .update(
                "1",
                CameraUpdate {
                    status: Some(CameraStatus::Offline),
                    fps: Some(0),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(roster.get("1").await.unwrap(), before);
    }

    #[tokio::test]
    async fn empty_update_does_not_touch_timestamp() {
        let roster = CameraRoster::new();
        let before = roster.get("2").await.unwrap();
        let after = roster.update("2", CameraUpdate::default()).await.unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn update_rejects_id_field() {
        let parsed: std::result::Result<CameraUpdate, _> =
            serde_json::from_str(r#"{"id":"5","status":"online"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn camera_wire_shape() {
        let value = serde_json::to_value(&seed_cameras()[1]).unwrap();
        assert_eq!(value["type"], "ptz");
        assert_eq!(value["lastUpdate"], "2024-01-15 14:30:20");
        assert_eq!(value["status"], "online");
    }
}
