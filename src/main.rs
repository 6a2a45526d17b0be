//! Camdash Server
//!
//! Main entry point for the dashboard backend.

use camdash_server::{
    live_feed::LiveFeed,
    state::{AppConfig, AppState},
    video_integration::VideoSdk,
    web_api,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "camdash_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Camdash Server v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        stats_drift = ?config.stats_drift,
        alarm_window_cap = config.alarm_window_cap,
        video_backend = ?config.video_backend,
        "Configuration loaded"
    );

    let state = AppState::new(config);

    // Bring the device SDK up front; failures leave it uninitialized
    match state.video.initialize().await {
        Ok(true) => tracing::info!(backend = state.video.backend_name(), "Video SDK initialized"),
        Ok(false) => tracing::warn!(backend = state.video.backend_name(), "Video SDK not ready"),
        Err(e) => tracing::error!(error = %e, "Video SDK initialization failed"),
    }

    if let Some(period) = state.config.live_tick {
        let feed = Arc::new(LiveFeed::new(
            state.simulation.clone(),
            state.realtime.clone(),
            period,
        ));
        feed.start();
    } else {
        tracing::info!("Live feed disabled");
    }

    let mut app = web_api::create_router(state.clone());
    if let Some(static_dir) = &state.config.static_dir {
        let serve_dir = ServeDir::new(static_dir)
            .not_found_service(ServeFile::new(static_dir.join("index.html")));
        app = app.fallback_service(serve_dir);
        tracing::info!(static_dir = %static_dir.display(), "Static file serving enabled");
    }
    let app = app
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
