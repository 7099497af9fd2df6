use std::sync::Mutex;

/// Counts trials processed and failed across the workflow run. Shared
/// between concurrently running trials, hence the interior lock.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    trials_processed: usize,
    trials_failed: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                trials_processed: 0,
                trials_failed: 0,
            }),
        }
    }

    pub fn record_trial(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.trials_processed += 1;
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.trials_failed += 1;
        }
    }

    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.trials_processed, metrics.trials_failed)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
