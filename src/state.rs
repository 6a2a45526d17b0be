//! Application state
//!
//! Holds all shared components and state

use crate::camera_roster::CameraRoster;
use crate::error::{Error, Result};
use crate::mock_generator::{RandomDraws, SimulationConfig, SimulationState, StatsDrift};
use crate::realtime_hub::RealtimeHub;
use crate::video_integration::{RandomProbe, VideoBackend, VideoIntegration};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Front-end bundle served as fallback
    pub static_dir: Option<PathBuf>,
    /// Statistics drift semantics
    pub stats_drift: StatsDrift,
    /// Rolling alarm window cap
    pub alarm_window_cap: usize,
    /// Live feed period (None = disabled)
    pub live_tick: Option<Duration>,
    /// Simulation RNG seed (None = OS entropy)
    pub sim_seed: Option<u64>,
    /// Video SDK backend
    pub video_backend: VideoBackend,
    /// Device protocol HTTP timeout
    pub device_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: None,
            stats_drift: StatsDrift::Cumulative,
            alarm_window_cap: 5,
            live_tick: Some(Duration::from_secs(5)),
            sim_seed: None,
            video_backend: VideoBackend::Simulated,
            device_timeout: Duration::from_secs(10),
        }
    }
}

impl AppConfig {
    /// Load from process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Unset keys take the default;
    /// malformed values are a `Config` error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let live_tick_secs: u64 = parse_or(&lookup, "LIVE_TICK_SECS", 5)?;
        let alarm_window_cap: usize =
            parse_or(&lookup, "ALARM_WINDOW_CAP", defaults.alarm_window_cap)?;
        if alarm_window_cap == 0 {
            return Err(Error::Config("ALARM_WINDOW_CAP must be at least 1".to_string()));
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            static_dir: lookup("STATIC_DIR").map(PathBuf::from),
            stats_drift: parse_or(&lookup, "STATS_DRIFT", defaults.stats_drift)?,
            alarm_window_cap,
            live_tick: (live_tick_secs > 0).then(|| Duration::from_secs(live_tick_secs)),
            sim_seed: lookup("SIM_SEED").map(|v| parse_value("SIM_SEED", &v)).transpose()?,
            video_backend: parse_or(&lookup, "VIDEO_BACKEND", defaults.video_backend)?,
            device_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DEVICE_TIMEOUT_SECS",
                defaults.device_timeout.as_secs(),
            )?),
        })
    }

    pub fn simulation(&self) -> SimulationConfig {
        SimulationConfig {
            drift: self.stats_drift,
            alarm_window_cap: self.alarm_window_cap,
            ..Default::default()
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => parse_value(key, &value),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("{}='{}': {}", key, value, e)))
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// Synthetic statistics / alarm state
    pub simulation: Arc<SimulationState>,
    /// Camera roster
    pub roster: Arc<CameraRoster>,
    /// Video SDK backend
    pub video: Arc<VideoIntegration>,
    /// RealtimeHub (WebSocket)
    pub realtime: Arc<RealtimeHub>,
    /// Process start
    pub started_at: Instant,
}

impl AppState {
    /// Wire every component from config
    pub fn new(config: AppConfig) -> Self {
        let simulation = Arc::new(SimulationState::new(
            config.simulation(),
            Box::new(RandomDraws::from_seed(config.sim_seed)),
        ));
        // Probe draws are independent of the simulation stream
        let probe_seed = config.sim_seed.map(|s| s.wrapping_add(1));
        let video = Arc::new(VideoIntegration::from_backend(
            config.video_backend,
            config.device_timeout,
            Box::new(RandomProbe::new(Box::new(RandomDraws::from_seed(probe_seed)))),
        ));

        Self {
            config,
            simulation,
            roster: Arc::new(CameraRoster::new()),
            video,
            realtime: Arc::new(RealtimeHub::new()),
            started_at: Instant::now(),
        }
    }
}
