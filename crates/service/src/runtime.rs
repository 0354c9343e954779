//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the binary and server crates can
//! call `service::runtime::ensure_env` without depending on `common`.

/// Ensure the data and uploads directories exist.
pub async fn ensure_env(data_dir: &str, uploads_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(data_dir, uploads_dir).await
}
