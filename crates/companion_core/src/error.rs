use std::path::PathBuf;

use thiserror::Error;

/// Failures of the bundled file-backed store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access store file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {} is not a JSON object of strings", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
