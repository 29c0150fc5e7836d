//! Prometheus metrics for the conversion batch.
//!
//! The statics are registered by the binary; see `all_metrics`.

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts};

/// Files processed, by outcome.
pub static FILES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("transmirror_files_total", "Total files processed"),
        &["outcome"], // "copied", "transcoded", "skipped_already_exists", "skipped_unsupported_format", "failed", "planned"
    )
    .unwrap()
});

/// Wall time of one decode | encode pipeline.
pub static TRANSCODE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "transmirror_transcode_duration_seconds",
            "Duration of the decode/encode pipeline per file",
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 40.0, 80.0, 160.0]),
        &["result"], // "success", "failure"
    )
    .unwrap()
});

/// Workers currently draining the queue.
pub static ACTIVE_WORKERS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "transmirror_active_workers",
        "Number of workers currently draining the queue",
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(FILES_TOTAL.clone()),
        Box::new(TRANSCODE_DURATION.clone()),
        Box::new(ACTIVE_WORKERS.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_metrics_register_once() {
        let registry = prometheus::Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }
        FILES_TOTAL.with_label_values(&["copied"]).inc();
        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();
        assert!(names.contains(&"transmirror_files_total".to_string()));
    }
}
