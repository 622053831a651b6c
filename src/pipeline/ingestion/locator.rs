use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Find every batch archive in `input_dir` whose file name matches `pattern`.
///
/// The result is sorted lexicographically so that first-seen-wins deduplication downstream
/// is reproducible. A missing directory or zero matches is not an error.
pub fn locate_batches(input_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir = glob::Pattern::escape(&input_dir.to_string_lossy());
    let full_pattern = Path::new(&dir).join(pattern);
    debug!("Scanning for batches with {}", full_pattern.display());

    let mut batches = Vec::new();
    for entry in glob::glob(&full_pattern.to_string_lossy())? {
        let path = entry?;
        if path.is_file() {
            batches.push(path);
        }
    }
    batches.sort();

    info!(
        "Found {} batch archive(s) in {}",
        batches.len(),
        input_dir.display()
    );
    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BATCH_PATTERN;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_matches_only_batch_archives_in_sorted_order() {
        let dir = tempdir().unwrap();
        for name in [
            "bank-marketing-campaing-2.csv.zip",
            "bank-marketing-campaing-0.csv.zip",
            "bank-marketing-campaing-10.csv.zip",
            "bank-marketing-campaing-1.csv",
            "other.csv.zip",
        ] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("bank-marketing-campaing-dir.csv.zip")).unwrap();

        let found = locate_batches(dir.path(), BATCH_PATTERN).unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "bank-marketing-campaing-0.csv.zip",
                "bank-marketing-campaing-10.csv.zip",
                "bank-marketing-campaing-2.csv.zip",
            ]
        );
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let dir = tempdir().unwrap();
        let found = locate_batches(&dir.path().join("absent"), BATCH_PATTERN).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_directory_with_glob_characters_is_escaped() {
        let dir = tempdir().unwrap();
        let odd = dir.path().join("in[put]");
        fs::create_dir(&odd).unwrap();
        fs::write(odd.join("bank-marketing-campaing-0.csv.zip"), b"").unwrap();

        assert_eq!(locate_batches(&odd, BATCH_PATTERN).unwrap().len(), 1);
    }
}
