//! Ingestion Phase Metrics
//!
//! Batches located, loaded and skipped, and rows read out of the archives.

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct IngestionMetrics;

impl IngestionMetrics {
    pub fn record_batches_found(count: usize) {
        ::metrics::counter!(phase_metric!(counter, "ingestion", "batches_found"))
            .increment(count as u64);
    }

    pub fn record_batch_loaded(rows: usize) {
        ::metrics::counter!(phase_metric!(counter, "ingestion", "batches_loaded")).increment(1);
        ::metrics::counter!(phase_metric!(counter, "ingestion", "rows_loaded"))
            .increment(rows as u64);
        ::metrics::histogram!(phase_metric!(histogram, "ingestion", "rows_per_batch"))
            .record(rows as f64);
    }

    /// Archive held no file entry
    pub fn record_batch_skipped() {
        ::metrics::counter!(phase_metric!(counter, "ingestion", "batches_skipped")).increment(1);
    }

    pub fn record_batch_failed() {
        ::metrics::counter!(phase_metric!(counter, "ingestion", "batch_errors")).increment(1);
    }

    pub fn record_columns_renamed(count: usize) {
        ::metrics::counter!(phase_metric!(counter, "ingestion", "columns_renamed"))
            .increment(count as u64);
    }
}

impl PhaseMetrics for IngestionMetrics {
    fn register_metrics() {
        use ::metrics::{counter, histogram};

        let _ = counter!(phase_metric!(counter, "ingestion", "batches_found"));
        let _ = counter!(phase_metric!(counter, "ingestion", "batches_loaded"));
        let _ = counter!(phase_metric!(counter, "ingestion", "batches_skipped"));
        let _ = counter!(phase_metric!(counter, "ingestion", "batch_errors"));
        let _ = counter!(phase_metric!(counter, "ingestion", "rows_loaded"));
        let _ = counter!(phase_metric!(counter, "ingestion", "columns_renamed"));
        let _ = histogram!(phase_metric!(histogram, "ingestion", "rows_per_batch"));
        let _ = histogram!(phase_metric!(histogram, "ingestion", "load_duration_seconds"));
    }

    fn phase_name() -> &'static str {
        "ingestion"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "ingestion", "batches_found"),
                metric_type: MetricType::Counter,
                help: "Archives matching the batch pattern",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "ingestion", "batches_loaded"),
                metric_type: MetricType::Counter,
                help: "Archives whose table was parsed",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "ingestion", "batches_skipped"),
                metric_type: MetricType::Counter,
                help: "Archives skipped because they held no file entry",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "ingestion", "batch_errors"),
                metric_type: MetricType::Counter,
                help: "Archives that could not be opened or parsed",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "ingestion", "rows_loaded"),
                metric_type: MetricType::Counter,
                help: "Data rows read across all batches",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "ingestion", "columns_renamed"),
                metric_type: MetricType::Counter,
                help: "Alternate column spellings reconciled to their canonical name",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(histogram, "ingestion", "rows_per_batch"),
                metric_type: MetricType::Histogram,
                help: "Data rows per loaded batch",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(histogram, "ingestion", "load_duration_seconds"),
                metric_type: MetricType::Histogram,
                help: "Time spent opening and parsing one archive",
                labels: vec![],
            },
        ]
    }
}
