//! API Routes

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use futures::{SinkExt, StreamExt};

use super::{video_routes, ApiJson};
use crate::camera_roster::CameraUpdate;
use crate::mock_generator::baseline::chart_series;
use crate::models::ApiResponse;
use crate::realtime_hub::HubMessage;
use crate::state::AppState;

const ALARMS_FAILED: &str = "获取告警数据失败";
const STATISTICS_FAILED: &str = "获取统计数据失败";

/// Create API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(super::health_check))
        // Dashboard feeds
        .route("/api/alarms", get(get_alarms))
        .route("/api/statistics", get(get_statistics))
        .route("/api/chart", get(get_chart))
        // Cameras
        .route("/api/cameras", get(list_cameras))
        .route("/api/cameras/:id", get(get_camera).put(update_camera))
        // Video SDK
        .route("/api/video/initialize", post(video_routes::initialize))
        .route(
            "/api/video/devices",
            get(video_routes::list_devices).post(video_routes::add_device),
        )
        .route("/api/video/devices/:id", delete(video_routes::remove_device))
        .route(
            "/api/video/devices/:id/stream",
            post(video_routes::start_stream).delete(video_routes::stop_stream),
        )
        .route("/api/video/devices/:id/snapshot", get(video_routes::snapshot))
        .route("/api/video/devices/:id/ptz", post(video_routes::control_ptz))
        .route("/api/video/devices/:id/status", get(video_routes::device_status))
        // WebSocket
        .route("/api/ws", get(websocket_handler))
        .with_state(state)
}

// ========================================
// Dashboard Feed Handlers
// ========================================

/// GET /api/alarms
/// One fresh alarm prepended to the rolling window
async fn get_alarms(State(state): State<AppState>) -> Response {
    match state.simulation.synthesize_alarm().await {
        Ok(window) => Json(ApiResponse::success(window)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Alarm synthesis failed");
            feed_failure(ALARMS_FAILED)
        }
    }
}

/// GET /api/statistics
/// One random-walk step of the statistics snapshot
async fn get_statistics(State(state): State<AppState>) -> Response {
    match state.simulation.refresh_statistics().await {
        Ok(statistics) => Json(ApiResponse::success(statistics)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Statistics refresh failed");
            feed_failure(STATISTICS_FAILED)
        }
    }
}

fn feed_failure(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error(message)),
    )
        .into_response()
}

async fn get_chart() -> impl IntoResponse {
    Json(ApiResponse::success(chart_series()))
}

// ========================================
// Camera Handlers
// ========================================

async fn list_cameras(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(state.roster.list().await))
}

async fn get_camera(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.roster.get(&id).await {
        Some(camera) => Json(ApiResponse::success(camera)).into_response(),
        None => crate::Error::NotFound(format!("Camera {} not found", id)).into_response(),
    }
}

async fn update_camera(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<CameraUpdate>,
) -> Response {
    match state.roster.update(&id, req).await {
        Ok(camera) => {
            state
                .realtime
                .broadcast(HubMessage::CameraUpdated(camera.clone()))
                .await;
            Json(ApiResponse::success(camera)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

// ========================================
// WebSocket
// ========================================

async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Handle WebSocket connection
async fn handle_websocket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    let (conn_id, mut rx) = state.realtime.register().await;

    // Forward hub messages to the socket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    // Drain incoming frames until close
    let recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Close(_)) => break,
                Err(e) => {
                    tracing::warn!(connection_id = %conn_id, error = %e, "WebSocket error");
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    state.realtime.unregister(&conn_id).await;
}
