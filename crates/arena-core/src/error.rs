use std::path::PathBuf;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading external combat data.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The input was not valid JSON for the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The path that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Read a file to a string, attaching the path to any I/O error.
pub(crate) fn read_file(path: &std::path::Path) -> CoreResult<String> {
    std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}
