//! Output Phase Metrics

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};
use crate::types::RelationKind;

pub struct OutputMetrics;

impl OutputMetrics {
    pub fn record_relation_written(kind: RelationKind, rows: usize, duplicates: usize) {
        ::metrics::counter!(phase_metric!(counter, "output", "rows_written"), "relation" => kind.name())
            .increment(rows as u64);
        ::metrics::counter!(phase_metric!(counter, "output", "duplicates_dropped"), "relation" => kind.name())
            .increment(duplicates as u64);
        ::metrics::counter!(phase_metric!(counter, "output", "files_written")).increment(1);
    }

    /// Nothing contributed rows to `kind`, so no file was produced
    pub fn record_relation_empty(kind: RelationKind) {
        ::metrics::counter!(phase_metric!(counter, "output", "relations_empty"), "relation" => kind.name())
            .increment(1);
    }

    pub fn record_run_duration(duration_secs: f64) {
        ::metrics::gauge!(phase_metric!(gauge, "run", "last_duration_seconds")).set(duration_secs);
    }
}

impl PhaseMetrics for OutputMetrics {
    fn register_metrics() {
        use ::metrics::{counter, gauge};

        let _ = counter!(phase_metric!(counter, "output", "files_written"));
        let _ = gauge!(phase_metric!(gauge, "run", "last_duration_seconds"));
    }

    fn phase_name() -> &'static str {
        "output"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "output", "rows_written"),
                metric_type: MetricType::Counter,
                help: "Rows written per relation after deduplication",
                labels: vec!["relation"],
            },
            MetricDoc {
                name: phase_metric!(counter, "output", "duplicates_dropped"),
                metric_type: MetricType::Counter,
                help: "Rows discarded because an earlier batch already held the client_id",
                labels: vec!["relation"],
            },
            MetricDoc {
                name: phase_metric!(counter, "output", "files_written"),
                metric_type: MetricType::Counter,
                help: "Output files written",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "output", "relations_empty"),
                metric_type: MetricType::Counter,
                help: "Relations left unwritten because no batch contributed rows",
                labels: vec!["relation"],
            },
            MetricDoc {
                name: phase_metric!(gauge, "run", "last_duration_seconds"),
                metric_type: MetricType::Gauge,
                help: "Wall time of the last run",
                labels: vec![],
            },
        ]
    }
}
