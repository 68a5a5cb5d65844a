//! Suspension points of turn-end resolution.
//!
//! The coordinator never sleeps directly; it awaits a [`Clock`] so tests can
//! resolve turn ends without real delays.
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

#[async_trait]
pub trait Clock: Send + Sync {
    /// Suspends the caller for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Real delays on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Yields instead of sleeping and records every requested delay.
#[derive(Debug, Clone, Default)]
pub struct ImmediateClock {
    requested: Arc<Mutex<Vec<Duration>>>,
}

impl ImmediateClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in order.
    pub fn requested(&self) -> Vec<Duration> {
        self.requested
            .lock()
            .map(|requested| requested.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Clock for ImmediateClock {
    async fn sleep(&self, duration: Duration) {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(duration);
        }
        tokio::task::yield_now().await;
    }
}
