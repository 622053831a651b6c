//! Run metrics for the cleaning pipeline
//!
//! Each phase owns its metric names in a dedicated submodule. The Prometheus recorder is
//! only installed when a textfile snapshot is requested; otherwise every `metrics` macro
//! call is a no-op and the run leaves nothing behind besides its output files.

pub mod core;
pub mod ingestion;
pub mod output;
pub mod registry;

pub use self::core::{time_operation, TimingGuard};
pub use ingestion::IngestionMetrics;
pub use output::OutputMetrics;

use crate::error::{CleanerError, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the in-process Prometheus recorder.
///
/// Idempotent: a second call (or a recorder installed elsewhere) leaves the first in place.
/// Returns whether a handle is available for rendering.
pub fn init_metrics() -> bool {
    if HANDLE.get().is_some() {
        return true;
    }
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if HANDLE.set(handle).is_err() {
                warn!("metrics handle was already stored");
            }
            registry::register_all_metrics();
            info!("Prometheus recorder installed");
            true
        }
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
            HANDLE.get().is_some()
        }
    }
}

/// Render the current snapshot in Prometheus text format, if a recorder is installed.
pub fn render_snapshot() -> Option<String> {
    HANDLE.get().map(|h| h.render())
}

/// Write the current snapshot to `path`, creating its parent directory.
pub fn write_textfile(path: &Path) -> Result<()> {
    let snapshot = render_snapshot()
        .ok_or_else(|| CleanerError::Metrics("no metrics recorder installed".to_string()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, snapshot)?;
    info!("Wrote metrics snapshot to {}", path.display());
    Ok(())
}

/// Implemented by each phase's metric collection
pub trait PhaseMetrics {
    /// Describe every metric of the phase so it shows up in the snapshot even at zero
    fn register_metrics();

    fn phase_name() -> &'static str;

    fn metrics_documentation() -> Vec<MetricDoc>;
}

#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
    #[allow(dead_code)]
    pub labels: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
    Gauge,
}

/// Build a metric name following `campaign_{phase}_{name}` (counters get `_total`).
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("campaign_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("campaign_", $phase, "_", $name)
    };
    (gauge, $phase:literal, $name:literal) => {
        concat!("campaign_", $phase, "_", $name)
    };
}

pub(crate) use phase_metric;
