//! Whole-file log reads and report writes.

use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// Read the full contents of a log file.
pub async fn read_log(path: &Path) -> CoreResult<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CoreError::NotFound(path.display().to_string())
        } else {
            CoreError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        }
    })
}

/// Write `contents` to `path`, replacing any existing file.
pub async fn write_report(path: &Path, contents: &str) -> CoreResult<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| CoreError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}
