//! Device registry and active-stream bookkeeping shared by every backend

use super::types::{DeviceConfig, DeviceEntry};
use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

pub struct DeviceRegistry {
    devices: RwLock<BTreeMap<String, DeviceConfig>>,
    streams: RwLock<BTreeSet<String>>,
}

impl DeviceRegistry {
    pub fn new(seed: Vec<DeviceEntry>) -> Self {
        Self {
            devices: RwLock::new(seed.into_iter().map(|d| (d.id, d.config)).collect()),
            streams: RwLock::new(BTreeSet::new()),
        }
    }

    /// Device config, `NotFound` for unknown ids
    pub async fn require(&self, id: &str) -> Result<DeviceConfig> {
        self.devices
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Device {} not found", id)))
    }

    pub async fn list(&self) -> Vec<DeviceEntry> {
        self.devices
            .read()
            .await
            .iter()
            .map(|(id, config)| DeviceEntry {
                id: id.clone(),
                config: config.clone(),
            })
            .collect()
    }

    /// Insert or replace a device
    pub async fn insert(&self, id: &str, config: DeviceConfig) -> Result<()> {
        if id.trim().is_empty() {
            return Err(Error::Validation("device id must not be empty".to_string()));
        }
        if config.ip.trim().is_empty() {
            return Err(Error::Validation("device ip must not be empty".to_string()));
        }
        self.devices.write().await.insert(id.to_string(), config);
        Ok(())
    }

    /// Remove a device and its stream. Returns whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        self.streams.write().await.remove(id);
        self.devices.write().await.remove(id).is_some()
    }

    pub async fn mark_streaming(&self, id: &str) {
        self.streams.write().await.insert(id.to_string());
    }

    /// Returns whether a stream was active
    pub async fn clear_streaming(&self, id: &str) -> bool {
        self.streams.write().await.remove(id)
    }

    pub async fn is_streaming(&self, id: &str) -> bool {
        self.streams.read().await.contains(id)
    }
}
