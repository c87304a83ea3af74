//! Live intake trackers, one per user
//!
//! Each tracker sits behind its own async mutex. Handlers hold that mutex
//! across the persistence write so taps from several devices are applied in
//! arrival order and storage never lags the in-memory state.
//!
//! Storage always holds the latest progress, so an idle tracker can be
//! dropped at any time and rebuilt on the next request.

use aquatrack_shared::IntakeTracker;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

pub type SharedTracker = Arc<Mutex<IntakeTracker>>;

struct Entry {
    tracker: SharedTracker,
    /// Milliseconds since the registry was created
    last_used: AtomicU64,
}

pub struct TrackerRegistry {
    trackers: RwLock<HashMap<Uuid, Entry>>,
    epoch: Instant,
}

impl Default for TrackerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerRegistry {
    pub fn new() -> Self {
        Self {
            trackers: RwLock::new(HashMap::new()),
            epoch: Instant::now(),
        }
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Tracker for `user_id` if one is loaded
    pub async fn get(&self, user_id: Uuid) -> Option<SharedTracker> {
        let trackers = self.trackers.read().await;
        let entry = trackers.get(&user_id)?;
        entry.last_used.store(self.now_ms(), Ordering::Relaxed);
        Some(entry.tracker.clone())
    }

    /// Tracker for `user_id`, building it with `load` on first use.
    ///
    /// `load` runs without holding the registry lock; if two requests race,
    /// the first tracker inserted wins and the other is dropped.
    pub async fn get_or_load<F, Fut, E>(&self, user_id: Uuid, load: F) -> Result<SharedTracker, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<IntakeTracker, E>>,
    {
        if let Some(tracker) = self.get(user_id).await {
            return Ok(tracker);
        }

        let tracker = load().await?;
        let now = self.now_ms();
        let mut trackers = self.trackers.write().await;
        Ok(trackers
            .entry(user_id)
            .or_insert_with(|| Entry {
                tracker: Arc::new(Mutex::new(tracker)),
                last_used: AtomicU64::new(now),
            })
            .tracker
            .clone())
    }

    /// Drop trackers untouched for `max_idle` that no request is using.
    /// Returns how many were removed.
    pub async fn sweep_idle(&self, max_idle: Duration) -> usize {
        let now = self.now_ms();
        let max_idle_ms = u64::try_from(max_idle.as_millis()).unwrap_or(u64::MAX);

        let mut trackers = self.trackers.write().await;
        let before = trackers.len();
        trackers.retain(|_, entry| {
            let idle_ms = now.saturating_sub(entry.last_used.load(Ordering::Relaxed));
            Arc::strong_count(&entry.tracker) > 1 || idle_ms < max_idle_ms
        });
        before - trackers.len()
    }

    pub async fn len(&self) -> usize {
        self.trackers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.trackers.read().await.is_empty()
    }
}

/// Sweep idle trackers every `max_idle / 2` for the life of the process
pub fn spawn_idle_sweeper(registry: Arc<TrackerRegistry>, max_idle: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval((max_idle / 2).max(Duration::from_secs(1)));
        loop {
            interval.tick().await;
            let removed = registry.sweep_idle(max_idle).await;
            if removed > 0 {
                debug!(removed, "Dropped idle trackers");
            }
        }
    })
}
