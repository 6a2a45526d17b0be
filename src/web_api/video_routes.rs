//! Video SDK API Routes
//!
//! Thin wrappers over the configured [`VideoSdk`] backend.

use super::ApiJson;
use crate::camera_roster::CameraStatus;
use crate::error::Result;
use crate::models::{ApiResponse, UrlResponse};
use crate::state::AppState;
use crate::video_integration::{
    AddDeviceRequest, DeviceEntry, OperationResult, PtzRequest, StreamConfig, VideoSdk,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};

type ApiResult<T> = Result<Json<ApiResponse<T>>>;

fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// POST /api/video/initialize
pub async fn initialize(State(state): State<AppState>) -> ApiResult<OperationResult> {
    let ok_flag = state.video.initialize().await?;
    ok(OperationResult { ok: ok_flag })
}

/// GET /api/video/devices
pub async fn list_devices(State(state): State<AppState>) -> ApiResult<Vec<DeviceEntry>> {
    ok(state.video.camera_list().await?)
}

/// POST /api/video/devices
pub async fn add_device(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AddDeviceRequest>,
) -> ApiResult<OperationResult> {
    let added = state.video.add_camera(&req.id, req.config).await?;
    ok(OperationResult { ok: added })
}

/// DELETE /api/video/devices/:id
pub async fn remove_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<OperationResult> {
    let removed = state.video.remove_camera(&id).await?;
    ok(OperationResult { ok: removed })
}

/// POST /api/video/devices/:id/stream
/// Body is an optional partial [`StreamConfig`]
pub async fn start_stream(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<UrlResponse> {
    let config = if body.is_empty() {
        StreamConfig::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| crate::Error::Validation(format!("invalid stream config: {}", e)))?
    };
    let url = state.video.video_stream(&id, &config).await?;
    ok(UrlResponse { url })
}

/// DELETE /api/video/devices/:id/stream
/// Succeeds whether or not a stream was active
pub async fn stop_stream(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<OperationResult> {
    let stopped = state.video.stop_video_stream(&id).await?;
    ok(OperationResult { ok: stopped })
}

/// GET /api/video/devices/:id/snapshot
pub async fn snapshot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UrlResponse> {
    let url = state.video.snapshot(&id).await?;
    ok(UrlResponse { url })
}

/// POST /api/video/devices/:id/ptz
/// `ok: false` when the command could not be delivered
pub async fn control_ptz(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<PtzRequest>,
) -> ApiResult<OperationResult> {
    let sent = state
        .video
        .control_ptz(&id, req.action, req.clamped_speed())
        .await?;
    ok(OperationResult { ok: sent })
}

/// GET /api/video/devices/:id/status
/// Unknown devices report `error`
pub async fn device_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CameraStatus> {
    ok(state.video.camera_status(&id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::state::AppConfig;
    use crate::video_integration::{DeviceConfig, PtzAction};

    fn state() -> AppState {
        AppState::new(AppConfig::default())
    }

    #[tokio::test]
    async fn stream_with_empty_body_uses_defaults() {
        let Json(resp) = start_stream(State(state()), Path("1".into()), Bytes::new())
            .await
            .unwrap();
        assert!(resp.data.unwrap().url.ends_with("/Streaming/Channels/101"));
    }

    #[tokio::test]
    async fn stream_with_bad_body_is_validation_error() {
        let body = Bytes::from_static(b"{\"fps\":\"x\"}");
        let err = start_stream(State(state()), Path("1".into()), body)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_device_snapshot_is_not_found() {
        let err = snapshot(State(state()), Path("77".into())).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn unknown_device_ptz_reports_not_ok() {
        let Json(resp) = control_ptz(
            State(state()),
            Path("77".into()),
            ApiJson(PtzRequest {
                action: PtzAction::Up,
                speed: 3.0,
            }),
        )
        .await
        .unwrap();
        assert!(resp.success);
        assert!(!resp.data.unwrap().ok);
    }

    #[tokio::test]
    async fn unknown_device_status_is_error() {
        let Json(resp) = device_status(State(state()), Path("77".into()))
            .await
            .unwrap();
        assert_eq!(resp.data, Some(CameraStatus::Error));
    }

    #[tokio::test]
    async fn stopping_idle_stream_is_ok() {
        let Json(resp) = stop_stream(State(state()), Path("1".into())).await.unwrap();
        assert!(resp.data.unwrap().ok);
    }

    #[tokio::test]
    async fn device_add_list_remove() {
        let state = state();
        add_device(
            State(state.clone()),
            ApiJson(AddDeviceRequest {
                id: "9".into(),
                config: DeviceConfig {
                    ip: "10.1.1.9".into(),
                    port: 8000,
                    username: "admin".into(),
                    password: "pw".into(),
                    channel: 1,
                },
            }),
        )
        .await
        .unwrap();

        let Json(list) = list_devices(State(state.clone())).await.unwrap();
        assert_eq!(list.data.unwrap().len(), 3);

        let Json(removed) = remove_device(State(state.clone()), Path("9".into()))
            .await
            .unwrap();
        assert!(removed.data.unwrap().ok);
    }
}
