//! Profile Refresh Background Job
//!
//! Interest profiles consumed by the relevance engine are precomputed; write
//! activity elsewhere in the application (likes, favorites, reads) makes them
//! stale. Those write paths emit a trigger onto this queue and move on: no
//! ordering, no completion guarantee, and a failed rebuild is logged and
//! dropped without ever reaching a request.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::engine::RelevanceEngine;

/// What kind of write activity triggered the rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Like,
    Favorite,
    Read,
    Manual,
}

impl RefreshTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Favorite => "favorite",
            Self::Read => "read",
            Self::Manual => "manual",
        }
    }
}

impl std::fmt::Display for RefreshTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fire-and-forget handle held by request handlers
#[derive(Clone)]
pub struct ProfileRefreshQueue {
    tx: mpsc::Sender<RefreshTrigger>,
}

impl ProfileRefreshQueue {
    /// Enqueue without blocking the request path. A full queue drops the
    /// trigger; the next one will pick up the same staleness.
    pub fn enqueue(&self, trigger: RefreshTrigger) {
        if let Err(e) = self.tx.try_send(trigger) {
            warn!(trigger = %trigger, error = %e, "profile refresh trigger dropped");
        }
    }
}

/// Spawn the worker draining refresh triggers and return its queue handle.
pub fn start_profile_refresher(
    engine: Arc<dyn RelevanceEngine>,
    queue_size: usize,
) -> ProfileRefreshQueue {
    let (tx, mut rx) = mpsc::channel::<RefreshTrigger>(queue_size);

    tokio::spawn(async move {
        info!(queue_size, "profile refresh worker started");
        while let Some(trigger) = rx.recv().await {
            let started = Instant::now();
            match engine.refresh_profiles(trigger.as_str()).await {
                Ok(()) => {
                    info!(
                        trigger = %trigger,
                        duration_ms = started.elapsed().as_millis() as u64,
                        "profile rebuild completed"
                    );
                }
                Err(e) => {
                    warn!(trigger = %trigger, error = %e, "profile rebuild failed");
                }
            }
        }
    });

    ProfileRefreshQueue { tx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use crate::models::RawRecommendation;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingEngine {
        refreshes: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl RelevanceEngine for CountingEngine {
        async fn recommend(
            &self,
            _identity: &str,
            _count: usize,
        ) -> Result<Vec<RawRecommendation>> {
            Ok(vec![])
        }

        async fn refresh_profiles(&self, _trigger: &str) -> Result<()> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AppError::EngineUnavailable("script missing".into()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn triggers_drive_the_engine() {
        let refreshes = Arc::new(AtomicUsize::new(0));
        let queue = start_profile_refresher(
            Arc::new(CountingEngine {
                refreshes: refreshes.clone(),
                fail: false,
            }),
            8,
        );

        queue.enqueue(RefreshTrigger::Like);
        queue.enqueue(RefreshTrigger::Read);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(refreshes.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn worker_failures_are_swallowed() {
        let refreshes = Arc::new(AtomicUsize::new(0));
        let queue = start_profile_refresher(
            Arc::new(CountingEngine {
                refreshes: refreshes.clone(),
                fail: true,
            }),
            8,
        );

        queue.enqueue(RefreshTrigger::Favorite);
        queue.enqueue(RefreshTrigger::Manual);

        tokio::time::sleep(Duration::from_millis(50)).await;
        // Both attempts ran despite the first failing
        assert_eq!(refreshes.load(Ordering::SeqCst), 2);
    }
}
