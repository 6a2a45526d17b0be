//! LiveFeed - Periodic simulation ticks
//!
//! Every tick refreshes statistics and synthesizes one alarm, then pushes
//! both to connected dashboard clients through the RealtimeHub.

use crate::mock_generator::SimulationState;
use crate::realtime_hub::{HubMessage, RealtimeHub};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Live feed ticker
pub struct LiveFeed {
    simulation: Arc<SimulationState>,
    realtime: Arc<RealtimeHub>,
    period: Duration,
}

impl LiveFeed {
    pub fn new(
        simulation: Arc<SimulationState>,
        realtime: Arc<RealtimeHub>,
        period: Duration,
    ) -> Self {
        Self {
            simulation,
            realtime,
            period,
        }
    }

    /// One simulation step, broadcast to clients
    pub async fn tick(&self) -> crate::Result<()> {
        let statistics = self.simulation.refresh_statistics().await?;
        self.realtime
            .broadcast(HubMessage::StatisticsUpdate(statistics))
            .await;

        let window = self.simulation.synthesize_alarm().await?;
        if let Some(alarm) = window.into_iter().next() {
            self.realtime.broadcast(HubMessage::AlarmRaised(alarm)).await;
        }

        Ok(())
    }

    /// Start ticking in the background
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tracing::info!(period_secs = self.period.as_secs(), "Live feed started");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.period);
            // First tick completes immediately; skip it so clients see the seed state first
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(e) = self.tick().await {
                    tracing::error!(error = %e, "Live feed tick error");
                }
            }
        })
    }
}
