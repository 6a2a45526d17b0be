//! Camdash Server Library
//!
//! Backend for the camera monitoring dashboard: synthetic alarm and
//! statistics feeds, the camera roster, and the video SDK boundary.
//!
//! ## Architecture
//!
//! 1. MockGenerator - Statistics random walk and rolling alarm window
//! 2. CameraRoster - In-memory camera records
//! 3. VideoIntegration - Device SDK boundary (simulated / ISAPI)
//! 4. RealtimeHub - WebSocket distribution
//! 5. LiveFeed - Periodic simulation ticks
//! 6. WebAPI - REST API endpoints
//!
//! ## Design Principles
//!
//! - Randomness is injected so every generator is deterministic under test
//! - One writer lock per shared component

pub mod camera_roster;
pub mod display_time;
pub mod error;
pub mod live_feed;
pub mod mock_generator;
pub mod models;
pub mod realtime_hub;
pub mod state;
pub mod video_integration;
pub mod web_api;

pub use error::{Error, Result};
pub use state::AppState;
