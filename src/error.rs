use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid batch pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to read batch directory entry: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Metrics error: {0}")]
    Metrics(String),

    #[error("Failed to load batch {}: {source}", .path.display())]
    Batch {
        path: PathBuf,
        #[source]
        source: Box<CleanerError>,
    },
}

impl CleanerError {
    /// Attach the archive path to a structural failure raised while loading it.
    pub fn in_batch(path: impl Into<PathBuf>, source: CleanerError) -> Self {
        Self::Batch {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanerError>;
