use crate::config::Config;
use crate::constants::CLIENT_ID;
use crate::error::Result;
use crate::metrics::{IngestionMetrics, OutputMetrics};
use crate::pipeline::ingestion::{load_batch, locate_batches, LoadOutcome};
use crate::pipeline::processing::{reconcile_columns, TransformSet};
use crate::pipeline::storage::{write_relation, Accumulators};
use crate::types::RelationKind;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, info_span, instrument};

/// Outcome of a single relation at the end of a run
#[derive(Debug, Clone, Serialize)]
pub struct RelationSummary {
    pub relation: RelationKind,
    pub contributing_batches: usize,
    pub rows_before_dedup: usize,
    pub duplicates_dropped: usize,
    pub rows_written: usize,
    /// `None` when no batch contributed rows and the file was not written
    pub output_file: Option<String>,
}

/// Result of a complete pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub started_at: DateTime<Utc>,
    pub batches_found: usize,
    pub batches_loaded: usize,
    pub skipped_batches: Vec<String>,
    pub relations: Vec<RelationSummary>,
    pub duration_secs: f64,
}

impl PipelineResult {
    pub fn relation(&self, kind: RelationKind) -> Option<&RelationSummary> {
        self.relations.iter().find(|r| r.relation == kind)
    }

    pub fn files_written(&self) -> usize {
        self.relations
            .iter()
            .filter(|r| r.output_file.is_some())
            .count()
    }
}

/// Counts gathered while walking the batches
#[derive(Debug, Default)]
struct IngestStats {
    loaded: usize,
    skipped: Vec<String>,
}

pub struct Pipeline;

impl Pipeline {
    /// Locate, load, transform and write every batch under `config.input_dir`.
    ///
    /// Empty archives are skipped with a warning. A batch that cannot be opened or parsed
    /// aborts the run before anything is written.
    #[instrument(skip(config), fields(input = %config.input_dir.display()))]
    pub fn run(config: &Config) -> Result<PipelineResult> {
        let started_at = Utc::now();
        let started = Instant::now();
        info!("Starting campaign cleaning run");

        let batches = locate_batches(&config.input_dir, &config.pattern)?;
        IngestionMetrics::record_batches_found(batches.len());

        let transforms = TransformSet::new(config.calendar_year);
        let (accumulators, stats) = Self::ingest_batches(&batches, &transforms)?;
        let relations = Self::write_outputs(accumulators, &config.output_dir)?;

        let duration_secs = started.elapsed().as_secs_f64();
        OutputMetrics::record_run_duration(duration_secs);

        let result = PipelineResult {
            started_at,
            batches_found: batches.len(),
            batches_loaded: stats.loaded,
            skipped_batches: stats.skipped,
            relations,
            duration_secs,
        };
        info!(
            "Run finished: {} batches ({} skipped), {} files written in {:.3}s",
            result.batches_found,
            result.skipped_batches.len(),
            result.files_written(),
            duration_secs
        );
        Ok(result)
    }

    /// Run every batch through reconciliation and the relation transforms, in order.
    fn ingest_batches(
        batches: &[PathBuf],
        transforms: &TransformSet,
    ) -> Result<(Accumulators, IngestStats)> {
        let mut accumulators = Accumulators::new();
        let mut stats = IngestStats::default();

        for path in batches {
            let span = info_span!("batch", path = %path.display());
            let _enter = span.enter();

            let mut table = match load_batch(path)? {
                LoadOutcome::Loaded { table, .. } => table,
                LoadOutcome::Empty => {
                    stats.skipped.push(path.display().to_string());
                    continue;
                }
            };
            stats.loaded += 1;

            reconcile_columns(&mut table);
            for (kind, part) in transforms.apply(&table) {
                accumulators.push(kind, part);
            }
        }

        Ok((accumulators, stats))
    }

    /// Deduplicate each relation and write the ones that received rows.
    fn write_outputs(accumulators: Accumulators, output_dir: &Path) -> Result<Vec<RelationSummary>> {
        fs::create_dir_all(output_dir)?;

        let mut summaries = Vec::new();
        for acc in accumulators.into_relations() {
            let aggregated = acc.finish(CLIENT_ID);
            let output_file = if aggregated.table.is_empty() {
                info!("No rows for {}, not writing {}", aggregated.kind, aggregated.kind.file_name());
                OutputMetrics::record_relation_empty(aggregated.kind);
                None
            } else {
                let path = write_relation(output_dir, aggregated.kind, &aggregated.table)?;
                OutputMetrics::record_relation_written(
                    aggregated.kind,
                    aggregated.table.len(),
                    aggregated.duplicates_dropped,
                );
                Some(path.display().to_string())
            };

            summaries.push(RelationSummary {
                relation: aggregated.kind,
                contributing_batches: aggregated.contributing_batches,
                rows_before_dedup: aggregated.rows_before_dedup,
                duplicates_dropped: aggregated.duplicates_dropped,
                rows_written: if output_file.is_some() { aggregated.table.len() } else { 0 },
                output_file,
            });
        }
        Ok(summaries)
    }
}
