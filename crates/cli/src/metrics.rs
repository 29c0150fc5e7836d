//! Metrics registry and textfile export.

use once_cell::sync::Lazy;
use prometheus::{Encoder, Registry, TextEncoder};
use std::path::Path;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

fn register_metrics(registry: &Registry) {
    for metric in transmirror_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Writes the current metrics to `path`, replacing it atomically so a
/// collector never reads a half-written file.
pub fn write_metrics_file(path: &Path) -> std::io::Result<()> {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    std::fs::write(&staging, encode_metrics())?;
    std::fs::rename(&staging, path)
}
