//! Statistics refresh (bounded random walk)

use super::draws::Draws;
use super::types::{MetricBounds, Statistics, StatisticsBounds};
use crate::error::{Error, Result};

/// Derive the next statistics snapshot from `prev`.
///
/// Visits grow by `U(0, visits_step)`; each utilization moves by
/// `U(-spread, spread)` and is clamped to its bounds. `prev` is untouched.
pub fn refresh_statistics(
    prev: &Statistics,
    bounds: &StatisticsBounds,
    draws: &mut dyn Draws,
) -> Result<Statistics> {
    let visits_step = draws.visits_step(bounds.visits_step);

    Ok(Statistics {
        today_visits: prev.today_visits.saturating_add(visits_step),
        cpu_usage: walk("cpu", prev.cpu_usage, &bounds.cpu, draws)?,
        memory_usage: walk("memory", prev.memory_usage, &bounds.memory, draws)?,
        storage_usage: walk("storage", prev.storage_usage, &bounds.storage, draws)?,
        ..prev.clone()
    })
}

fn walk(metric: &str, value: f64, bounds: &MetricBounds, draws: &mut dyn Draws) -> Result<f64> {
    let delta = draws.delta(bounds.spread);
    if !delta.is_finite() {
        return Err(Error::Generation(format!(
            "non-finite {} delta: {}",
            metric, delta
        )));
    }
    Ok(bounds.clamp(value + delta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_generator::baseline::baseline_statistics;
    use crate::mock_generator::draws::testing::ScriptedDraws;
    use crate::mock_generator::draws::RandomDraws;

    #[test]
    fn small_delta_applies() {
        let mut draws = ScriptedDraws::new().with_deltas(&[3.0, 0.0, 0.0]);
        let next =
            refresh_statistics(&baseline_statistics(), &StatisticsBounds::default(), &mut draws)
                .unwrap();
        assert_eq!(next.cpu_usage, 68.0);
        assert_eq!(next.memory_usage, 78.0);
        assert_eq!(next.storage_usage, 45.0);
    }

    #[test]
    fn large_delta_clamps_to_max() {
        let mut draws = ScriptedDraws::new().with_deltas(&[30.0, 30.0, -100.0]);
        let next =
            refresh_statistics(&baseline_statistics(), &StatisticsBounds::default(), &mut draws)
                .unwrap();
        assert_eq!(next.cpu_usage, 90.0);
        assert_eq!(next.memory_usage, 95.0);
        assert_eq!(next.storage_usage, 30.0);
    }

    #[test]
    fn visits_step_added_and_counts_kept() {
        let mut draws = ScriptedDraws::new().with_steps(&[9]);
        let base = baseline_statistics();
        let next = refresh_statistics(&base, &StatisticsBounds::default(), &mut draws).unwrap();
        assert_eq!(next.today_visits, base.today_visits + 9);
        assert_eq!(next.online_cameras, base.online_cameras);
        assert_eq!(next.alarm_count, base.alarm_count);
    }

    #[test]
    fn non_finite_delta_is_generation_error() {
        let mut draws = ScriptedDraws::new().with_deltas(&[f64::NAN]);
        let err =
            refresh_statistics(&baseline_statistics(), &StatisticsBounds::default(), &mut draws)
                .unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[test]
    fn long_walk_stays_bounded_and_visits_monotonic() {
        let bounds = StatisticsBounds::default();
        let mut draws = RandomDraws::from_seed(Some(2024));
        let mut current = baseline_statistics();

        for _ in 0..5_000 {
            let next = refresh_statistics(&current, &bounds, &mut draws).unwrap();
            assert!(bounds.cpu.contains(next.cpu_usage));
            assert!(bounds.memory.contains(next.memory_usage));
            assert!(bounds.storage.contains(next.storage_usage));
            assert!(next.today_visits >= current.today_visits);
            current = next;
        }
    }
}
