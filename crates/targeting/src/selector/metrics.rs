use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::warn;

static METRICS_LOCK_POISON_WARNED: AtomicBool = AtomicBool::new(false);

fn warn_metrics_lock_poison_once(operation: &'static str) {
    if METRICS_LOCK_POISON_WARNED
        .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
        .is_ok()
    {
        warn!(operation, "selection metrics lock poisoned; recovered inner value");
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionMetricsSnapshot {
    pub refresh_count: u64,
    pub candidate_count: usize,
    pub last_refresh_micros: u64,
    pub cycle_count: u64,
    pub dispatch_count: u64,
}

#[derive(Clone, Debug)]
pub struct SelectionMetricsHandle {
    snapshot: Arc<RwLock<SelectionMetricsSnapshot>>,
}

impl Default for SelectionMetricsHandle {
    fn default() -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(SelectionMetricsSnapshot::default())),
        }
    }
}

impl SelectionMetricsHandle {
    pub fn snapshot(&self) -> SelectionMetricsSnapshot {
        match self.snapshot.read() {
            Ok(guard) => *guard,
            Err(poisoned) => {
                warn_metrics_lock_poison_once("read");
                *poisoned.into_inner()
            }
        }
    }

    pub(crate) fn record_refresh(&self, candidate_count: usize, elapsed: Duration) {
        self.update(|snapshot| {
            snapshot.refresh_count = snapshot.refresh_count.saturating_add(1);
            snapshot.candidate_count = candidate_count;
            snapshot.last_refresh_micros = elapsed.as_micros().min(u64::MAX as u128) as u64;
        });
    }

    pub(crate) fn record_cycle(&self) {
        self.update(|snapshot| snapshot.cycle_count = snapshot.cycle_count.saturating_add(1));
    }

    pub(crate) fn record_dispatch(&self) {
        self.update(|snapshot| {
            snapshot.dispatch_count = snapshot.dispatch_count.saturating_add(1)
        });
    }

    fn update(&self, apply: impl FnOnce(&mut SelectionMetricsSnapshot)) {
        match self.snapshot.write() {
            Ok(mut guard) => apply(&mut guard),
            Err(poisoned) => {
                warn_metrics_lock_poison_once("write");
                let mut guard = poisoned.into_inner();
                apply(&mut guard);
            }
        }
    }
}
