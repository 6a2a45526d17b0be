//! Synthetic state type definitions

use super::draws::Closed;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Dashboard statistics snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub online_cameras: u32,
    pub today_visits: u64,
    pub alarm_count: u32,
    /// CPU utilization (%)
    pub cpu_usage: f64,
    /// Memory utilization (%)
    pub memory_usage: f64,
    /// Storage utilization (%)
    pub storage_usage: f64,
}

/// Bounds of one utilization metric's random walk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBounds {
    pub min: f64,
    pub max: f64,
    /// Half-width of the per-step delta: U(-spread, spread)
    pub spread: f64,
}

impl MetricBounds {
    pub const fn new(min: f64, max: f64, spread: f64) -> Self {
        Self { min, max, spread }
    }

    /// Clamp into [min, max]. Never panics, even for NaN input.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Per-metric bounds for a statistics refresh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticsBounds {
    pub cpu: MetricBounds,
    pub memory: MetricBounds,
    pub storage: MetricBounds,
    /// Exclusive upper bound of the visits step: U(0, visits_step)
    pub visits_step: u64,
}

impl Default for StatisticsBounds {
    fn default() -> Self {
        Self {
            cpu: MetricBounds::new(30.0, 90.0, 5.0),
            memory: MetricBounds::new(40.0, 95.0, 5.0),
            storage: MetricBounds::new(30.0, 80.0, 5.0),
            visits_step: 10,
        }
    }
}

/// Where each statistics refresh starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsDrift {
    /// Walk from the last returned snapshot
    #[default]
    Cumulative,
    /// Restart from the seed baseline on every refresh
    Baseline,
}

impl FromStr for StatsDrift {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cumulative" => Ok(Self::Cumulative),
            "baseline" => Ok(Self::Baseline),
            other => Err(Error::Config(format!(
                "STATS_DRIFT must be 'cumulative' or 'baseline', got '{}'",
                other
            ))),
        }
    }
}

/// Alarm category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmCategory {
    Motion,
    Face,
    Vehicle,
    System,
}

impl Closed for AlarmCategory {
    const ALL: &'static [Self] = &[Self::Motion, Self::Face, Self::Vehicle, Self::System];
}

/// Alarm severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl Closed for AlarmSeverity {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Critical];
}

/// Alarm status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmStatus {
    Active,
    Resolved,
}

/// Alarm record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: String,
    #[serde(rename = "type")]
    pub category: AlarmCategory,
    #[serde(rename = "level")]
    pub severity: AlarmSeverity,
    pub message: String,
    #[serde(with = "crate::display_time")]
    pub time: DateTime<Utc>,
    pub camera: String,
    pub status: AlarmStatus,
}

/// One point of the daily dashboard chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub time: String,
    pub visitors: u32,
    pub alerts: u32,
    pub cpu: u32,
    pub memory: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_handles_extremes() {
        let bounds = MetricBounds::new(30.0, 90.0, 5.0);
        assert_eq!(bounds.clamp(1e12), 90.0);
        assert_eq!(bounds.clamp(-1e12), 30.0);
        assert_eq!(bounds.clamp(f64::INFINITY), 90.0);
        assert!(bounds.contains(bounds.clamp(f64::NAN)));
    }

    #[test]
    fn stats_drift_parses() {
        assert_eq!("Baseline".parse::<StatsDrift>().unwrap(), StatsDrift::Baseline);
        assert_eq!(" cumulative".parse::<StatsDrift>().unwrap(), StatsDrift::Cumulative);
        assert!("random".parse::<StatsDrift>().is_err());
    }

    #[test]
    fn alarm_wire_names() {
        let alarm = Alarm {
            id: "7".into(),
            category: AlarmCategory::Vehicle,
            severity: AlarmSeverity::Critical,
            message: "m".into(),
            time: crate::display_time::parse("2024-01-15 14:30:25").unwrap(),
            camera: "c".into(),
            status: AlarmStatus::Active,
        };
        let value = serde_json::to_value(&alarm).unwrap();
        assert_eq!(value["type"], "vehicle");
        assert_eq!(value["level"], "critical");
        assert_eq!(value["status"], "active");
        assert_eq!(value["time"], "2024-01-15 14:30:25");
    }

    #[test]
    fn statistics_wire_names() {
        let stats = Statistics {
            online_cameras: 1,
            today_visits: 2,
            alarm_count: 3,
            cpu_usage: 4.0,
            memory_usage: 5.0,
            storage_usage: 6.0,
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["onlineCameras"], 1);
        assert_eq!(value["todayVisits"], 2);
        assert_eq!(value["storageUsage"], 6.0);
    }
}
