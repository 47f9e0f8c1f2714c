use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

/// Totals reported once at the end of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub images_produced: usize,
    pub errors: usize,
    pub samples_skipped: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} images produced, {} errors, {} samples skipped",
            self.images_produced, self.errors, self.samples_skipped
        )
    }
}

/// Monotonic run counters; never reset during a run.
pub struct MetricsRecorder {
    inner: Mutex<RunSummary>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RunSummary::default()),
        }
    }

    pub fn record_image(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.images_produced += 1;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    pub fn record_skipped_sample(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.samples_skipped += 1;
        }
    }

    pub fn snapshot(&self) -> RunSummary {
        self.inner.lock().map(|metrics| *metrics).unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
