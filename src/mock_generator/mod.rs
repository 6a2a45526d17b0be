//! MockGenerator - Synthetic State Generator
//!
//! ## Responsibilities
//!
//! - Statistics bounded random walk (visits, CPU/memory/storage)
//! - Alarm synthesis into a capped rolling window
//! - Seed data (baseline statistics, alarm history, chart series)
//!
//! Randomness is injected through [`Draws`] so callers can script exact outputs.

pub mod alarms;
pub mod baseline;
pub mod draws;
pub mod service;
pub mod statistics;
pub mod types;

pub use draws::{choose, Closed, Draws, RandomDraws};
pub use service::{SimulationConfig, SimulationState};
pub use types::*;
