//! RealtimeHub - WebSocket Distribution
//!
//! ## Responsibilities
//!
//! - WebSocket connection management
//! - Broadcasting statistics refreshes, new alarms and camera updates
//!
//! Each client gets its own unbounded channel; a slow client never blocks
//! the broadcaster.

use crate::camera_roster::Camera;
use crate::mock_generator::{Alarm, Statistics};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Hub message types
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum HubMessage {
    StatisticsUpdate(Statistics),
    AlarmRaised(Alarm),
    CameraUpdated(Camera),
}

impl HubMessage {
    fn kind(&self) -> &'static str {
        match self {
            HubMessage::StatisticsUpdate(_) => "statistics_update",
            HubMessage::AlarmRaised(_) => "alarm_raised",
            HubMessage::CameraUpdated(_) => "camera_updated",
        }
    }
}

/// RealtimeHub instance
pub struct RealtimeHub {
    connections: RwLock<HashMap<Uuid, mpsc::UnboundedSender<String>>>,
    connection_count: AtomicU64,
}

impl RealtimeHub {
    /// Create new RealtimeHub
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            connection_count: AtomicU64::new(0),
        }
    }

    /// Register a new client
    pub async fn register(&self) -> (Uuid, mpsc::UnboundedReceiver<String>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();

        self.connections.write().await.insert(id, tx);
        self.connection_count.fetch_add(1, Ordering::Relaxed);

        tracing::info!(connection_id = %id, "Client connected");

        (id, rx)
    }

    /// Unregister a client
    pub async fn unregister(&self, id: &Uuid) {
        let mut connections = self.connections.write().await;
        if connections.remove(id).is_some() {
            self.connection_count.fetch_sub(1, Ordering::Relaxed);
            tracing::info!(connection_id = %id, "Client disconnected");
        }
    }

    /// Broadcast message to all clients. Returns the number of clients reached.
    pub async fn broadcast(&self, message: HubMessage) -> usize {
        let json = match serde_json::to_string(&message) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize message");
                return 0;
            }
        };

        let connections = self.connections.read().await;
        tracing::debug!(
            message_type = %message.kind(),
            client_count = connections.len(),
            "Broadcasting message to clients"
        );

        let mut delivered = 0;
        for (id, tx) in connections.iter() {
            match tx.send(json.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(connection_id = %id, error = %e, "Failed to send message");
                }
            }
        }
        delivered
    }

    /// Get connection count
    pub fn connection_count(&self) -> u64 {
        self.connection_count.load(Ordering::Relaxed)
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_generator::baseline::baseline_statistics;

    #[tokio::test]
    async fn broadcast_reaches_every_client() {
        let hub = RealtimeHub::new();
        let (_a, mut rx_a) = hub.register().await;
        let (_b, mut rx_b) = hub.register().await;
        assert_eq!(hub.connection_count(), 2);

        let delivered = hub
            .broadcast(HubMessage::StatisticsUpdate(baseline_statistics()))
            .await;
        assert_eq!(delivered, 2);

        for rx in [&mut rx_a, &mut rx_b] {
            let text = rx.recv().await.unwrap();
            let value: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert_eq!(value["type"], "statistics_update");
            assert_eq!(value["data"]["todayVisits"], 1256);
        }
    }

    #[tokio::test]
    async fn unregister_stops_delivery() {
        let hub = RealtimeHub::new();
        let (id, _rx) = hub.register().await;
        hub.unregister(&id).await;
        hub.unregister(&id).await;

        assert_eq!(hub.connection_count(), 0);
        assert_eq!(
            hub.broadcast(HubMessage::StatisticsUpdate(baseline_statistics())).await,
            0
        );
    }

    #[tokio::test]
    async fn dropped_receiver_is_not_counted() {
        let hub = RealtimeHub::new();
        let (_id, rx) = hub.register().await;
        drop(rx);
        assert_eq!(
            hub.broadcast(HubMessage::StatisticsUpdate(baseline_statistics())).await,
            0
        );
    }
}
