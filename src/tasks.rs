// ABOUTME: Detached background recompute of per-user statistics
// ABOUTME: Spawned tasks are time-bounded, panic-isolated, and tracked for draining on shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

//! Background recompute queue
//!
//! Every measurement mutation schedules a recompute of its owner's stats.
//! The task is spawned onto the runtime and not joined by the caller, so the
//! mutation returns as soon as its own write commits. Failures, timeouts,
//! and panics are logged and dropped; the next mutation or a lazy stats read
//! repairs any staleness.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use tokio::sync::Notify;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::services::StatsAggregator;

#[derive(Default)]
struct InFlight {
    count: AtomicUsize,
    idle: Notify,
}

/// Decrements the in-flight count when the task ends, however it ends
struct InFlightGuard(Arc<InFlight>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.0.count.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

/// Fire-and-forget scheduler for stats recomputes
#[derive(Clone)]
pub struct RecomputeQueue {
    aggregator: StatsAggregator,
    timeout: Duration,
    in_flight: Arc<InFlight>,
}

impl RecomputeQueue {
    /// Create a queue whose tasks give up after `timeout`
    #[must_use]
    pub fn new(aggregator: StatsAggregator, timeout: Duration) -> Self {
        Self {
            aggregator,
            timeout,
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// Spawn a recompute for `user_id` without waiting for it
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(&self, user_id: Uuid) {
        self.in_flight.count.fetch_add(1, Ordering::AcqRel);
        let guard = InFlightGuard(Arc::clone(&self.in_flight));
        let aggregator = self.aggregator.clone();
        let timeout = self.timeout;

        tokio::spawn(async move {
            let _guard = guard;
            let work = tokio::time::timeout(timeout, aggregator.recompute(user_id));

            match AssertUnwindSafe(work).catch_unwind().await {
                Ok(Ok(Ok(stats))) => {
                    debug!(
                        user_id = %user_id,
                        count = stats.measurement_count,
                        "Background stats recompute finished"
                    );
                }
                Ok(Ok(Err(e))) => {
                    warn!(user_id = %user_id, error = %e, "Background stats recompute failed");
                }
                Ok(Err(_)) => {
                    warn!(
                        user_id = %user_id,
                        timeout_secs = timeout.as_secs_f64(),
                        "Background stats recompute timed out"
                    );
                }
                Err(payload) => {
                    error!(
                        user_id = %user_id,
                        panic = %panic_message(payload.as_ref()),
                        "Background stats recompute panicked"
                    );
                }
            }
        });
    }

    /// Number of recomputes that have not finished yet
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.count.load(Ordering::Acquire)
    }

    /// Wait until every scheduled recompute has finished
    pub async fn drain(&self) {
        loop {
            let idle = self.in_flight.idle.notified();
            if self.in_flight() == 0 {
                return;
            }
            idle.await;
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_variants() {
        let static_payload: Box<dyn Any + Send> = Box::new("boom");
        let owned_payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        let other_payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(static_payload.as_ref()), "boom");
        assert_eq!(panic_message(owned_payload.as_ref()), "bang");
        assert_eq!(panic_message(other_payload.as_ref()), "Unknown panic");
    }
}
