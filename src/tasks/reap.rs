//! Cache Reap Task
//!
//! Background task that periodically sweeps stale entries out of the cache.

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::{lock_store, CacheStore};

// == Reap Handle ==
/// Owns the running reap task and its stop signal.
///
/// Dropping the handle closes the stop channel, which also ends the task.
#[derive(Debug)]
pub struct ReapHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ReapHandle {
    /// Signals the task to stop and waits until it has exited.
    pub async fn shutdown(self) {
        // Err only means the task is already gone
        let _ = self.stop.send(());

        if let Err(e) = self.task.await {
            warn!("Reap task ended abnormally: {}", e);
        }
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawns a task that reaps `store` once per store interval.
///
/// The sweep period equals the expiry interval. The first sweep runs one full
/// interval after spawning. Returns `None` when the interval is zero, since
/// such a store never expires anything.
///
/// Must be called from within a tokio runtime.
pub fn spawn_reap_task(store: Arc<Mutex<CacheStore>>) -> Option<ReapHandle> {
    let interval = lock_store(&store).interval();
    if interval.is_zero() {
        debug!("Cache interval is zero, reap task not started");
        return None;
    }

    let (stop, mut stop_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        info!("Starting cache reap task with interval of {:?}", interval);

        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = &mut stop_rx => {
                    debug!("Cache reap task stopping");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = lock_store(&store).reap(Instant::now());

                    if removed > 0 {
                        info!("Cache reap: removed {} stale entries", removed);
                    } else {
                        debug!("Cache reap: no stale entries found");
                    }
                }
            }
        }
    });

    Some(ReapHandle { stop, task })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn shared_store(interval: Duration) -> Arc<Mutex<CacheStore>> {
        Arc::new(Mutex::new(CacheStore::new(interval)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_reap_task_removes_stale_entries() {
        let store = shared_store(Duration::from_secs(1));
        lock_store(&store).add("expire_soon".to_string(), b"value");

        let handle = spawn_reap_task(store.clone()).unwrap();

        // Ticks at 1s (entry is exactly 1s old, kept) and 2s (removed)
        time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(lock_store(&store).get("expire_soon"), None);
        assert_eq!(lock_store(&store).stats().reaped, 1);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_reap_task_preserves_live_entries() {
        let store = shared_store(Duration::from_secs(10));

        let handle = spawn_reap_task(store.clone()).unwrap();

        time::sleep(Duration::from_secs(8)).await;
        lock_store(&store).add("long_lived".to_string(), b"value");

        // Sweep at 10s sees a 2s-old entry
        time::sleep(Duration::from_secs(3)).await;

        assert_eq!(lock_store(&store).get("long_lived"), Some(b"value".to_vec()));

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_reap_task_not_started_for_zero_interval() {
        let store = shared_store(Duration::ZERO);
        assert!(spawn_reap_task(store).is_none());
    }

    #[tokio::test]
    async fn test_reap_task_shutdown_is_deterministic() {
        let store = shared_store(Duration::from_secs(60));

        let handle = spawn_reap_task(store.clone()).unwrap();
        handle.shutdown().await;

        // The task no longer holds a reference to the store
        assert_eq!(Arc::strong_count(&store), 1);
    }

    #[tokio::test]
    async fn test_reap_task_stops_when_handle_dropped() {
        let store = shared_store(Duration::from_secs(60));

        let handle = spawn_reap_task(store.clone()).unwrap();
        drop(handle);

        // Dropping closes the channel; give the task a chance to observe it
        for _ in 0..100 {
            if Arc::strong_count(&store) == 1 {
                break;
            }
            time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(Arc::strong_count(&store), 1);
    }
}
