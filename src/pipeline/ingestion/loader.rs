use crate::error::{CleanerError, Result};
use crate::metrics::{phase_metric, time_operation, IngestionMetrics};
use crate::types::{Table, Value};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use zip::ZipArchive;

/// Result of opening one batch archive
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded { entry_name: String, table: Table },
    /// The archive held no file entry; the batch is skipped
    Empty,
}

/// Open the archive at `path` and parse its first file entry.
///
/// Structural failures (unreadable archive, malformed CSV) come back as
/// [`CleanerError::Batch`] carrying the archive path. The archive is closed before returning.
#[instrument(skip_all, fields(batch = %path.display()))]
pub fn load_batch(path: &Path) -> Result<LoadOutcome> {
    let _timing = time_operation(phase_metric!(histogram, "ingestion", "load_duration_seconds"));
    match open_and_parse(path) {
        Ok(LoadOutcome::Loaded { entry_name, table }) => {
            info!(
                "Loaded {} rows x {} columns from {}",
                table.len(),
                table.width(),
                entry_name
            );
            IngestionMetrics::record_batch_loaded(table.len());
            Ok(LoadOutcome::Loaded { entry_name, table })
        }
        Ok(LoadOutcome::Empty) => {
            warn!("Archive {} is empty, skipping", path.display());
            IngestionMetrics::record_batch_skipped();
            Ok(LoadOutcome::Empty)
        }
        Err(e) => {
            IngestionMetrics::record_batch_failed();
            Err(CleanerError::in_batch(path, e))
        }
    }
}

fn open_and_parse(path: &Path) -> Result<LoadOutcome> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut first: Option<(usize, String)> = None;
    let mut file_entries = 0usize;
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        file_entries += 1;
        if first.is_none() {
            first = Some((i, entry.name().to_string()));
        }
    }

    let Some((index, entry_name)) = first else {
        return Ok(LoadOutcome::Empty);
    };
    if file_entries > 1 {
        warn!(
            "Archive {} holds {} files; only {} is read",
            path.display(),
            file_entries,
            entry_name
        );
    }

    let entry = archive.by_index(index)?;
    let table = read_table(entry)?;
    Ok(LoadOutcome::Loaded { entry_name, table })
}

/// Parse comma-separated text with a header row into a [`Table`].
///
/// Empty fields load as [`Value::Null`]. Each column is typed independently: integer when
/// every non-empty field parses as `i64`, decimal when every one parses as a finite `f64`,
/// text otherwise.
pub fn read_table<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_reader(reader);

    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let records = rdr.records().collect::<std::result::Result<Vec<StringRecord>, _>>()?;

    let kinds: Vec<ColumnKind> = (0..columns.len())
        .map(|c| ColumnKind::infer(records.iter().filter_map(|r| r.get(c))))
        .collect();
    debug!("Inferred column kinds: {:?}", kinds);

    let rows = records
        .iter()
        .map(|record| {
            kinds
                .iter()
                .enumerate()
                .map(|(c, kind)| kind.convert(record.get(c).unwrap_or("")))
                .collect()
        })
        .collect();

    Ok(Table::from_rows(columns, rows))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Text,
}

impl ColumnKind {
    fn infer<'a>(fields: impl Iterator<Item = &'a str>) -> Self {
        let mut kind = ColumnKind::Int;
        for field in fields.filter(|f| !f.is_empty()) {
            if kind == ColumnKind::Int && field.parse::<i64>().is_err() {
                kind = ColumnKind::Float;
            }
            if kind == ColumnKind::Float && !parses_finite(field) {
                return ColumnKind::Text;
            }
        }
        kind
    }

    fn convert(&self, field: &str) -> Value {
        if field.is_empty() {
            return Value::Null;
        }
        match self {
            ColumnKind::Int => field
                .parse()
                .map(Value::Int)
                .unwrap_or_else(|_| Value::text(field)),
            ColumnKind::Float => field
                .parse()
                .map(Value::Float)
                .unwrap_or_else(|_| Value::text(field)),
            ColumnKind::Text => Value::text(field),
        }
    }
}

fn parses_finite(field: &str) -> bool {
    field.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;
    use zip::write::FileOptions;
    use zip::CompressionMethod;

    fn zip_with(entries: &[(&str, &str)]) -> NamedTempFile {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
            for (name, content) in entries {
                if name.ends_with('/') {
                    zip.add_directory(*name, options).unwrap();
                } else {
                    zip.start_file(*name, options).unwrap();
                    zip.write_all(content.as_bytes()).unwrap();
                }
            }
            zip.finish().unwrap();
        }
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(&buf).unwrap();
        tmp
    }

    #[test]
    fn test_read_table_infers_per_column_types() {
        let csv = "client_id,job,cons_price_idx,day\n1,admin.,93.994,5\n2,,94.1,\n";
        let table = read_table(csv.as_bytes()).unwrap();

        assert_eq!(table.columns().len(), 4);
        assert_eq!(
            table.rows()[0],
            vec![
                Value::Int(1),
                Value::text("admin."),
                Value::Float(93.994),
                Value::Int(5)
            ]
        );
        assert_eq!(table.rows()[1][1], Value::Null);
        assert_eq!(table.rows()[1][3], Value::Null);
    }

    #[test]
    fn test_mixed_column_stays_text() {
        let table = read_table("a\n5\nabc\n".as_bytes()).unwrap();
        assert_eq!(table.rows()[0][0], Value::text("5"));
        assert_eq!(table.rows()[1][0], Value::text("abc"));
    }

    #[test]
    fn test_ragged_rows_fail() {
        assert!(read_table("a,b\n1\n".as_bytes()).is_err());
    }

    #[test]
    fn test_load_batch_reads_first_file_entry() {
        let tmp = zip_with(&[
            ("nested/", ""),
            ("batch.csv", "client_id,age\n7,40\n"),
            ("extra.csv", "client_id\n99\n"),
        ]);

        match load_batch(tmp.path()).unwrap() {
            LoadOutcome::Loaded { entry_name, table } => {
                assert_eq!(entry_name, "batch.csv");
                assert_eq!(table.len(), 1);
                assert_eq!(table.get(0, "age"), Some(&Value::Int(40)));
            }
            LoadOutcome::Empty => panic!("expected a table"),
        }
    }

    #[test]
    fn test_load_batch_empty_archive_is_skipped() {
        let tmp = zip_with(&[]);
        assert!(matches!(load_batch(tmp.path()).unwrap(), LoadOutcome::Empty));
    }

    #[test]
    fn test_load_batch_corrupt_archive_names_the_batch() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(b"not a zip").unwrap();

        let err = load_batch(tmp.path()).unwrap_err();
        match err {
            CleanerError::Batch { path, source } => {
                assert_eq!(path, tmp.path());
                assert!(matches!(*source, CleanerError::Zip(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
