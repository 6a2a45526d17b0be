//! Alarm synthesis and the rolling alarm window

use super::draws::{choose, Draws};
use super::types::{Alarm, AlarmStatus};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

pub const NEW_ALARM_MESSAGE: &str = "检测到新的告警事件";
pub const NEW_ALARM_CAMERA: &str = "监控摄像头";
pub const DEFAULT_WINDOW_CAP: usize = 5;

/// Issues alarm ids derived from generation time.
///
/// The id is the millisecond timestamp, bumped past the last issued id when
/// two alarms land in the same millisecond (or the clock steps back).
#[derive(Debug, Default)]
pub struct AlarmIdSource {
    last: u64,
}

impl AlarmIdSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source whose next id is strictly greater than `last`
    pub fn resume_after(last: u64) -> Self {
        Self { last }
    }

    /// Next id for an alarm generated at `now_ms`; `None` once the id space is used up
    pub fn next_at(&mut self, now_ms: u64) -> Option<u64> {
        let id = if now_ms > self.last {
            now_ms
        } else {
            self.last.checked_add(1)?
        };
        self.last = id;
        Some(id)
    }
}

/// Synthesize one active alarm at `now`
pub fn synthesize_alarm(
    ids: &mut AlarmIdSource,
    now: DateTime<Utc>,
    draws: &mut dyn Draws,
) -> Result<Alarm> {
    let now_ms = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let id = ids
        .next_at(now_ms)
        .ok_or_else(|| Error::Generation("alarm id space exhausted".to_string()))?;

    Ok(Alarm {
        id: id.to_string(),
        category: choose(draws),
        severity: choose(draws),
        message: NEW_ALARM_MESSAGE.to_string(),
        time: crate::display_time::truncate_seconds(now),
        camera: NEW_ALARM_CAMERA.to_string(),
        status: AlarmStatus::Active,
    })
}

/// Bounded newest-first alarm list
#[derive(Debug, Clone)]
pub struct AlarmWindow {
    alarms: VecDeque<Alarm>,
    cap: usize,
}

impl AlarmWindow {
    /// Empty window; a cap of 0 is raised to 1
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            alarms: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Window holding the first `cap` alarms of `seed` (newest-first order)
    pub fn from_seed(seed: impl IntoIterator<Item = Alarm>, cap: usize) -> Self {
        let mut window = Self::new(cap);
        window.alarms.extend(seed.into_iter().take(window.cap));
        window
    }

    /// Prepend `alarm`, evicting the oldest entries beyond the cap
    pub fn push(&mut self, alarm: Alarm) {
        self.alarms.push_front(alarm);
        self.alarms.truncate(self.cap);
    }

    pub fn snapshot(&self) -> Vec<Alarm> {
        self.alarms.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&Alarm> {
        self.alarms.front()
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}
