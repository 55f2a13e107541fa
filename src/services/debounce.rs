//! Announcement debounce gate.
//!
//! Remembers when each `instrument|timeframe|verdict` combination was last
//! announced and suppresses repeats inside the cooldown window. The table
//! survives restarts through a JSON snapshot on disk.

use crate::error::Result;
use dashmap::DashMap;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Debounce key for one announcement identity.
pub fn debounce_key(instrument: &str, timeframe_label: &str, verdict_label: &str) -> String {
    format!("{instrument}|{timeframe_label}|{verdict_label}")
}

/// Cooldown table keyed by [`debounce_key`].
pub struct DebounceGate {
    last_announced: DashMap<String, i64>,
    locks: DashMap<String, Arc<Mutex<()>>>,
    cooldown_ms: i64,
}

impl DebounceGate {
    pub fn new(cooldown_ms: i64) -> Self {
        Self {
            last_announced: DashMap::new(),
            locks: DashMap::new(),
            cooldown_ms,
        }
    }

    /// Per-key lock serializing the check-then-record sequence. Callers
    /// hold this across [`may_announce`](Self::may_announce) and
    /// [`record_announcement`](Self::record_announcement) so concurrent
    /// evaluations of the same key admit exactly one announcement.
    pub fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Whether the key is outside its cooldown window. Keys never seen
    /// before are always admitted.
    pub fn may_announce(&self, key: &str, now_ms: i64) -> bool {
        match self.last_announced.get(key) {
            Some(last) => now_ms - *last >= self.cooldown_ms,
            None => true,
        }
    }

    /// Record a delivered announcement. Only called after delivery
    /// succeeds, so a failed send stays eligible for retry.
    pub fn record_announcement(&self, key: &str, now_ms: i64) {
        self.last_announced.insert(key.to_string(), now_ms);
    }

    /// Flat copy of the cooldown table.
    pub fn snapshot(&self) -> HashMap<String, i64> {
        self.last_announced
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect()
    }

    /// Replace the table with a previously taken snapshot.
    pub fn load_snapshot(&self, snapshot: HashMap<String, i64>) {
        self.last_announced.clear();
        for (key, ts) in snapshot {
            self.last_announced.insert(key, ts);
        }
    }

    /// Write the cooldown table to disk as a flat JSON object.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path, json)?;
        debug!("persisted debounce state to {:?}", path);
        Ok(())
    }

    /// Build a gate from a snapshot file. A missing or unreadable file
    /// starts the gate empty rather than failing startup.
    pub fn restore(path: &Path, cooldown_ms: i64) -> Self {
        let gate = Self::new(cooldown_ms);

        if !path.exists() {
            info!("no debounce state at {:?}, starting fresh", path);
            return gate;
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<HashMap<String, i64>>(&contents) {
                Ok(snapshot) => {
                    info!("restored {} debounce entries from {:?}", snapshot.len(), path);
                    gate.load_snapshot(snapshot);
                }
                Err(e) => {
                    warn!("discarding corrupt debounce state at {:?}: {}", path, e);
                }
            },
            Err(e) => {
                warn!("failed to read debounce state at {:?}: {}", path, e);
            }
        }

        gate
    }
}
