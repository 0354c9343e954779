//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Ensure the data and uploads directories exist before the server binds.
pub async fn ensure_env(data_dir: &str, uploads_dir: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    if let Err(e) = tokio::fs::create_dir_all(uploads_dir).await {
        warn!(%uploads_dir, error = %e, "cannot create uploads directory; image uploads will fail");
    }
    Ok(())
}
