//! Clock abstraction for the readiness delay
//!
//! Production code uses `SystemClock`, which reads `chrono::Utc::now()` and
//! sleeps on the tokio timer. Tests use `ManualClock` to move time forward
//! by hand, so delay-dependent behavior needs no wall-clock waits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Source of time for delayed initialization
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Resolve once `now()` has reached `deadline`
    async fn sleep_until(&self, deadline: DateTime<Utc>);
}

/// Wall-clock time backed by the tokio timer
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep_until(&self, deadline: DateTime<Utc>) {
        // A deadline in the past converts to Err and returns immediately
        if let Ok(remaining) = (deadline - Utc::now()).to_std() {
            tokio::time::sleep(remaining).await;
        }
    }
}

/// Hand-driven clock for tests
///
/// Sleepers subscribe to a watch channel and wake whenever `advance`
/// moves time; they return once the deadline is reached.
#[cfg(test)]
pub struct ManualClock {
    now: tokio::sync::watch::Sender<DateTime<Utc>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        let (now, _) = tokio::sync::watch::channel(now);
        Self { now }
    }

    pub fn advance(&self, by: std::time::Duration) {
        let by = chrono::Duration::from_std(by).unwrap_or_else(|_| chrono::Duration::days(36_500));
        self.now.send_modify(|t| *t = t.checked_add_signed(by).unwrap_or(*t));
    }
}

#[cfg(test)]
#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.borrow()
    }

    async fn sleep_until(&self, deadline: DateTime<Utc>) {
        let mut rx = self.now.subscribe();
        loop {
            let now = *rx.borrow_and_update();
            if now >= deadline {
                return;
            }
            if rx.changed().await.is_err() {
                // Clock dropped: time can never reach the deadline
                std::future::pending::<()>().await;
            }
        }
    }
}
