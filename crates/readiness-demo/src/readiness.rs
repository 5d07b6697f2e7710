//! Delayed readiness — a one-shot timer that flips the service to ready.
//!
//! The ready timestamp is published through a `watch` channel holding
//! `Option<ReadyMark>`. Readiness is derived from that single value, so a
//! reader sees either the pre-timer or the post-timer state and nothing in
//! between. Once set, the mark is never cleared.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

/// Default delay before the service reports ready.
pub const DEFAULT_READY_DELAY: Duration = Duration::from_secs(60);

/// When the service became ready.
#[derive(Debug, Clone, Copy)]
pub struct ReadyMark {
    /// Wall-clock time, for display.
    pub at: DateTime<Local>,
    /// Monotonic time, for uptime arithmetic.
    pub instant: Instant,
}

/// Shared readiness handle. Cheap to clone.
#[derive(Clone)]
pub struct Readiness {
    started_at: DateTime<Local>,
    started: Instant,
    ready: Arc<watch::Sender<Option<ReadyMark>>>,
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}

impl Readiness {
    /// Capture the start time. The service is not ready yet.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            started_at: Local::now(),
            started: Instant::now(),
            ready: Arc::new(tx),
        }
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// The ready mark, if the timer has fired.
    pub fn ready_mark(&self) -> Option<ReadyMark> {
        *self.ready.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.ready_mark().is_some()
    }

    /// Time since process start, regardless of readiness.
    pub fn uptime_since_start(&self) -> Duration {
        self.started.elapsed()
    }

    /// Publish readiness. Returns `false` if already ready; the first mark
    /// is kept.
    pub fn mark_ready(&self) -> bool {
        let mark = ReadyMark {
            at: Local::now(),
            instant: Instant::now(),
        };
        let changed = self.ready.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(mark);
            true
        });

        if changed {
            let elapsed = mark.instant.duration_since(self.started).as_secs_f64();
            info!(elapsed_secs = %format!("{elapsed:.2}"), "service is ready");
        } else {
            debug!("readiness already published");
        }
        changed
    }

    /// Receiver that observes the ready transition.
    #[cfg(test)]
    fn subscribe(&self) -> watch::Receiver<Option<ReadyMark>> {
        self.ready.subscribe()
    }
}

/// Spawn the one-shot readiness timer.
///
/// Not cancelable; the handle is only useful for tests that want to wait
/// for the transition.
pub fn spawn_ready_timer(readiness: Readiness, delay: Duration) -> JoinHandle<()> {
    info!(delay_secs = delay.as_secs(), "sleeping before becoming ready");
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        readiness.mark_ready();
    })
}
