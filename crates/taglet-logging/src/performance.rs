// ABOUTME: Timing helpers built on tracing spans
// ABOUTME: Used to time suggestion fetches and flag slow sources

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{Level, Span, field, span, warn};

/// Timer guard that records elapsed time on its span when dropped
pub struct PerfTimer {
    span: Span,
    start: Instant,
    operation: String,
    warn_threshold: Option<Duration>,
}

impl PerfTimer {
    pub fn new(operation: &str) -> Self {
        let span =
            span!(Level::DEBUG, "perf_timer", operation = %operation, elapsed_ms = field::Empty);

        Self {
            span,
            start: Instant::now(),
            operation: operation.to_string(),
            warn_threshold: None,
        }
    }

    /// Operations slower than `threshold` log a warning when the timer finishes
    pub fn with_warn_threshold(mut self, threshold: Duration) -> Self {
        self.warn_threshold = Some(threshold);
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop timing and return the measured duration
    pub fn finish(self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for PerfTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        #[allow(clippy::cast_precision_loss)]
        let elapsed_ms = elapsed.as_millis() as f64;

        self.span.record("elapsed_ms", elapsed_ms);

        if let Some(threshold) = self.warn_threshold
            && elapsed > threshold
        {
            #[allow(clippy::cast_precision_loss)]
            let threshold_ms = threshold.as_millis() as f64;
            warn!(
                operation = %self.operation,
                elapsed_ms = elapsed_ms,
                threshold_ms = threshold_ms,
                "Slow operation detected"
            );
        }
    }
}

/// Running count and total duration per operation name
#[derive(Debug, Default, Clone)]
pub struct PerfStats {
    entries: HashMap<String, (u64, Duration)>,
}

impl PerfStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_operation(&mut self, operation: &str, duration: Duration) {
        let entry = self
            .entries
            .entry(operation.to_string())
            .or_insert((0, Duration::ZERO));
        entry.0 += 1;
        entry.1 += duration;
    }

    /// `(count, total, average)` for an operation, if it was ever recorded
    pub fn get_stats(&self, operation: &str) -> Option<(u64, Duration, Duration)> {
        let (count, total) = *self.entries.get(operation)?;
        let average = total / u32::try_from(count).unwrap_or(u32::MAX);
        Some((count, total, average))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
