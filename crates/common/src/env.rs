//! Environment/runtime helpers
//!
//! Sanity checks on the data directory before the server starts accepting requests.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the data directory exists; warn when the repository file is not there yet.
///
/// The repository file is provisioned externally, so its absence is not fatal:
/// `/githubList` and friends will answer 500 until it appears.
pub async fn ensure_env(data_dir: &Path, repos_file: &Path) -> anyhow::Result<()> {
    let meta = tokio::fs::metadata(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("data directory {} unavailable: {e}", data_dir.display()))?;
    if !meta.is_dir() {
        anyhow::bail!("{} is not a directory", data_dir.display());
    }
    if tokio::fs::metadata(repos_file).await.is_err() {
        warn!(path = %repos_file.display(), "repository file not found; list/add/delete will fail until it is created");
    } else {
        info!(path = %repos_file.display(), "repository file found");
    }
    Ok(())
}
