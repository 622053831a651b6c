use crate::error::Result;
use crate::types::{RelationKind, Table, Value};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write `table` to `<output_dir>/<kind file>`, replacing any existing file.
pub fn write_relation(output_dir: &Path, kind: RelationKind, table: &Table) -> Result<PathBuf> {
    let path = output_dir.join(kind.file_name());
    let file = File::create(&path)?;
    write_table(file, table)?;
    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(path)
}

/// Comma-separated, header row first, absent values as empty fields.
pub fn write_table<W: Write>(writer: W, table: &Table) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(Value::render))?;
    }
    wtr.flush()?;
    Ok(())
}
