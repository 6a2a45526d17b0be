//! Simulation state container
//!
//! Single owner of the canonical statistics snapshot and alarm window.
//! Writers serialize on the write lock; readers get cloned snapshots.

use super::alarms::{synthesize_alarm, AlarmIdSource, AlarmWindow};
use super::baseline::{baseline_statistics, seed_alarms};
use super::draws::Draws;
use super::statistics::refresh_statistics;
use super::types::{Alarm, Statistics, StatisticsBounds, StatsDrift};
use crate::error::Result;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Simulation settings
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub drift: StatsDrift,
    pub bounds: StatisticsBounds,
    pub alarm_window_cap: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            drift: StatsDrift::Cumulative,
            bounds: StatisticsBounds::default(),
            alarm_window_cap: super::alarms::DEFAULT_WINDOW_CAP,
        }
    }
}

struct SimulationInner {
    statistics: Statistics,
    alarms: AlarmWindow,
    ids: AlarmIdSource,
    draws: Box<dyn Draws>,
}

/// Mutable synthetic state behind a single-writer lock
pub struct SimulationState {
    config: SimulationConfig,
    baseline: Statistics,
    seed: Vec<Alarm>,
    inner: RwLock<SimulationInner>,
}

impl SimulationState {
    /// Create state seeded from the fixed baseline
    pub fn new(config: SimulationConfig, draws: Box<dyn Draws>) -> Self {
        let baseline = baseline_statistics();
        let seed = seed_alarms();
        let inner = SimulationInner {
            statistics: baseline.clone(),
            alarms: AlarmWindow::from_seed(seed.clone(), config.alarm_window_cap),
            ids: AlarmIdSource::new(),
            draws,
        };

        Self {
            config,
            baseline,
            seed,
            inner: RwLock::new(inner),
        }
    }

    /// Replace the alarm id source
    pub fn with_id_source(mut self, ids: AlarmIdSource) -> Self {
        self.inner.get_mut().ids = ids;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Apply one random-walk step and return the new snapshot
    pub async fn refresh_statistics(&self) -> Result<Statistics> {
        let mut inner = self.inner.write().await;
        let inner = &mut *inner;

        let prev = match self.config.drift {
            StatsDrift::Cumulative => &inner.statistics,
            StatsDrift::Baseline => &self.baseline,
        };
        let next = refresh_statistics(prev, &self.config.bounds, inner.draws.as_mut())?;
        inner.statistics = next.clone();

        tracing::debug!(
            today_visits = next.today_visits,
            cpu_usage = next.cpu_usage,
            memory_usage = next.memory_usage,
            storage_usage = next.storage_usage,
            "Statistics refreshed"
        );

        Ok(next)
    }

    /// Synthesize one alarm, prepend it to the window and return the window
    pub async fn synthesize_alarm(&self) -> Result<Vec<Alarm>> {
        self.synthesize_alarm_at(Utc::now()).await
    }

    /// As [`Self::synthesize_alarm`], with an explicit generation time
    pub async fn synthesize_alarm_at(&self, now: DateTime<Utc>) -> Result<Vec<Alarm>> {
        let mut inner = self.inner.write().await;
        let inner = &mut *inner;

        let alarm = synthesize_alarm(&mut inner.ids, now, inner.draws.as_mut())?;

        tracing::info!(
            alarm_id = %alarm.id,
            category = ?alarm.category,
            severity = ?alarm.severity,
            "Alarm synthesized"
        );

        if self.config.drift == StatsDrift::Baseline {
            inner.alarms = AlarmWindow::from_seed(self.seed.clone(), self.config.alarm_window_cap);
        }
        inner.alarms.push(alarm);

        Ok(inner.alarms.snapshot())
    }

    /// Last statistics snapshot
    pub async fn statistics(&self) -> Statistics {
        self.inner.read().await.statistics.clone()
    }

    /// Current alarm window, newest first
    pub async fn alarms(&self) -> Vec<Alarm> {
        self.inner.read().await.alarms.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_generator::draws::testing::ScriptedDraws;
    use crate::mock_generator::draws::RandomDraws;
    use crate::mock_generator::types::AlarmStatus;
    use std::sync::Arc;

    fn state_with(drift: StatsDrift, draws: ScriptedDraws) -> SimulationState {
        SimulationState::new(
            SimulationConfig {
                drift,
                ..Default::default()
            },
            Box::new(draws),
        )
    }

    #[tokio::test]
    async fn cumulative_refresh_walks_from_last_snapshot() {
        let state = state_with(
            StatsDrift::Cumulative,
            ScriptedDraws::new()
                .with_steps(&[4, 5])
                .with_deltas(&[3.0, 0.0, 0.0, 3.0, 0.0, 0.0]),
        );

        let first = state.refresh_statistics().await.unwrap();
        let second = state.refresh_statistics().await.unwrap();

        assert_eq!(first.cpu_usage, 68.0);
        assert_eq!(second.cpu_usage, 71.0);
        assert_eq!(second.today_visits, 1256 + 4 + 5);
        assert_eq!(state.statistics().await, second);
    }

    #[tokio::test]
    async fn baseline_refresh_restarts_every_time() {
        let state = state_with(
            StatsDrift::Baseline,
            ScriptedDraws::new()
                .with_steps(&[4, 5])
                .with_deltas(&[3.0, 0.0, 0.0, 3.0, 0.0, 0.0]),
        );

        state.refresh_statistics().await.unwrap();
        let second = state.refresh_statistics().await.unwrap();

        assert_eq!(second.cpu_usage, 68.0);
        assert_eq!(second.today_visits, 1256 + 5);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let draws = ScriptedDraws::new().with_deltas(&[f64::INFINITY]);
        let state = state_with(StatsDrift::Cumulative, draws);
        assert!(state.refresh_statistics().await.is_err());
        assert_eq!(state.statistics().await, baseline_statistics());
    }

    #[tokio::test]
    async fn alarm_window_prepends_and_caps() {
        let state = state_with(StatsDrift::Cumulative, ScriptedDraws::new());

        let window = state.synthesize_alarm().await.unwrap();
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].status, AlarmStatus::Active);
        assert_eq!(window[1].id, "1");

        let newest = window[0].id.clone();
        let window = state.synthesize_alarm().await.unwrap();
        assert_eq!(window.len(), 5);
        assert_eq!(window[1].id, newest);
    }

    #[tokio::test]
    async fn failed_synthesis_keeps_window() {
        let state = state_with(StatsDrift::Cumulative, ScriptedDraws::new())
            .with_id_source(AlarmIdSource::resume_after(u64::MAX));
        assert!(state.synthesize_alarm().await.is_err());

        let ids: Vec<String> = state.alarms().await.into_iter().map(|a| a.id).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);
    }

    #[tokio::test]
    async fn baseline_alarms_always_one_new_plus_first_four_seeds() {
        let state = state_with(StatsDrift::Baseline, ScriptedDraws::new());

        state.synthesize_alarm().await.unwrap();
        let window = state.synthesize_alarm().await.unwrap();

        let ids: Vec<&str> = window.iter().skip(1).map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn concurrent_synthesis_yields_unique_ids() {
        let state = Arc::new(SimulationState::new(
            SimulationConfig {
                alarm_window_cap: 64,
                ..Default::default()
            },
            Box::new(RandomDraws::from_seed(Some(5))),
        ));
        let now = Utc::now();

        let mut handles = Vec::new();
        for _ in 0..32 {
            let state = state.clone();
            handles.push(tokio::spawn(async move { state.synthesize_alarm_at(now).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let window = state.alarms().await;
        let new_ids: std::collections::HashSet<_> = window
            .iter()
            .filter(|a| a.id.len() > 1)
            .map(|a| a.id.clone())
            .collect();
        assert_eq!(new_ids.len(), 32);
    }
}
