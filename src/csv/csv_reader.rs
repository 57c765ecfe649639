use std::{fs, io, path::Path};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read CSV at path {path}: {source}")]
    Unavailable {
        path: String,
        #[source]
        source: io::Error,
    },
}

// Non-UTF-8 content is reported the same way as a missing file.
pub fn read_csv_source(path: &Path) -> Result<String, SourceError> {
    info!(path = %path.display(), "reading CSV source");
    fs::read_to_string(path).map_err(|source| SourceError::Unavailable {
        path: path.display().to_string(),
        source,
    })
}
