//! Process-wide observer for detection latency and outcome.

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use crate::detector::DetectError;

/// Metrics observer for detector calls.
pub trait DetectMetrics: Send + Sync {
    fn record_detect(&self, latency: Duration, result: Result<(), &DetectError>);
}

/// Install or clear the global detection metrics recorder.
pub fn set_detect_metrics(recorder: Option<Arc<dyn DetectMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn DetectMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn DetectMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn DetectMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

pub(crate) struct MetricsSpan {
    recorder: Arc<dyn DetectMetrics>,
    start: Instant,
}

impl MetricsSpan {
    pub(crate) fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    pub(crate) fn record_detect(self, result: Result<(), &DetectError>) {
        self.recorder.record_detect(self.start.elapsed(), result);
    }
}
