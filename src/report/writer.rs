//! Report file output.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Create the output directory if it does not exist yet.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))
}

/// Write `content` to `dir/file_name`, replacing any previous file.
///
/// Returns the path written.
pub fn write_report(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    debug!("Wrote {} bytes to {}", content.len(), path.display());

    Ok(path)
}
