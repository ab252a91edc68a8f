use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// Cross-cutting logger for path-building events.
///
/// Lets the CLI (or a host service) observe progress, per-stage latency and
/// failure counts without the use case knowing where output goes.
pub trait PipelineLogger: Send {
    /// Report segment-level progress.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long one call of a named stage took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Increment a named counter (e.g. `forward.no_match`).
    fn count(&mut self, name: &str, amount: usize);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Logger that discards all events. Used by tests and embedding callers.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn count(&mut self, _name: &str, _amount: usize) {}
    fn info(&mut self, _message: &str) {}
}

/// `log`-backed logger with per-stage timing and counters.
///
/// Progress lines are throttled to every `throttle_segments` segments.
pub struct StdoutPipelineLogger {
    throttle_segments: usize,
    timings: HashMap<String, Vec<f64>>,
    counters: BTreeMap<String, usize>,
    start_time: Instant,
    total_segments: usize,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_segments: usize) -> Self {
        Self {
            throttle_segments: throttle_segments.max(1),
            timings: HashMap::new(),
            counters: BTreeMap::new(),
            start_time: Instant::now(),
            total_segments: 0,
        }
    }

    /// Returns the formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.counters.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let segments = self.total_segments;
        let mut lines = vec![format!(
            "Path summary ({segments} segments, {:.1}s total):",
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = if durations.is_empty() {
                0.0
            } else {
                total_ms / durations.len() as f64
            };
            lines.push(format!(
                "  {stage:12}: {calls:4} calls  avg {avg_ms:7.1}ms  total {total_ms:8.0}ms",
                calls = durations.len()
            ));
        }

        for (name, value) in &self.counters {
            lines.push(format!("  {name}: {value}"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn counter(&self, name: &str) -> usize {
        self.counters.get(name).copied().unwrap_or(0)
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(25)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_segments = total;
        if total > 0 && (current % self.throttle_segments == 0 || current == total) {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("Processing: {current}/{total} segments ({pct:.1}%)");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn count(&mut self, name: &str, amount: usize) {
        *self.counters.entry(name.to_string()).or_default() += amount;
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullPipelineLogger;
        logger.progress(1, 10);
        logger.timing("forward", 5.0);
        logger.count("forward.no_match", 1);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_timing_records_values() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.timing("forward", 20.0);
        logger.timing("forward", 30.0);
        logger.timing("extract", 5.0);

        let forward = logger.timings_for("forward").unwrap();
        assert_eq!(forward.len(), 2);
        assert!((forward[1] - 30.0).abs() < f64::EPSILON);
        assert_eq!(logger.timings_for("extract").unwrap().len(), 1);
        assert!(logger.timings_for("reverse").is_none());
    }

    #[test]
    fn test_counters_accumulate() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.count("waypoints", 3);
        logger.count("waypoints", 2);
        logger.count("merged", 1);

        assert_eq!(logger.counter("waypoints"), 5);
        assert_eq!(logger.counter("merged"), 1);
        assert_eq!(logger.counter("missing"), 0);
    }

    #[test]
    fn test_summary_lists_stages_and_counters() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.progress(4, 4);
        logger.timing("forward", 120.0);
        logger.timing("reverse", 80.0);
        logger.count("forward.no_match", 2);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Path summary (4 segments"));
        assert!(summary.contains("forward"));
        assert!(summary.contains("reverse"));
        assert!(summary.contains("forward.no_match: 2"));
    }

    #[test]
    fn test_summary_none_when_empty() {
        let logger = StdoutPipelineLogger::new(10);
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_throttle_clamped_to_one() {
        let mut logger = StdoutPipelineLogger::new(0);
        logger.progress(1, 3);
        assert_eq!(logger.total_segments, 3);
    }
}
