//! Registers every phase's metrics and catches name collisions between phases

use crate::metrics::{MetricDoc, MetricType, PhaseMetrics};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Register and describe all phase metrics. Returns the number of distinct names.
pub fn register_all_metrics() -> usize {
    let mut all_metrics: HashMap<&'static str, (&'static str, MetricDoc)> = HashMap::new();

    register_phase_metrics::<super::ingestion::IngestionMetrics>(&mut all_metrics);
    register_phase_metrics::<super::output::OutputMetrics>(&mut all_metrics);

    debug!("Registered {} metrics across all phases", all_metrics.len());
    all_metrics.len()
}

fn register_phase_metrics<T: PhaseMetrics>(
    all_metrics: &mut HashMap<&'static str, (&'static str, MetricDoc)>,
) {
    T::register_metrics();
    let phase_name = T::phase_name();

    for doc in T::metrics_documentation() {
        if let Some((owner, _)) = all_metrics.get(doc.name) {
            warn!(
                "Metric name conflict: '{}' is defined by both '{}' and '{}'",
                doc.name, owner, phase_name
            );
            continue;
        }
        describe(&doc);
        all_metrics.insert(doc.name, (phase_name, doc));
    }
}

fn describe(doc: &MetricDoc) {
    match doc.metric_type {
        MetricType::Counter => ::metrics::describe_counter!(doc.name, doc.help),
        MetricType::Histogram => ::metrics::describe_histogram!(doc.name, doc.help),
        MetricType::Gauge => ::metrics::describe_gauge!(doc.name, doc.help),
    }
}
