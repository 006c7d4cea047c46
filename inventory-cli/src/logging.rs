use anyhow::Result;
use chrono::Local;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Where the interactive session writes its log
pub fn log_path() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))?;
    Ok(cache_dir.join("inventory-cli").join("inventory-cli.log"))
}

/// Initialize tracing. The TUI owns the terminal, so interactive sessions
/// log to a file under the cache dir; one-shot runs log to stderr.
pub fn init_tracing(to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if to_file {
        let path = log_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .compact()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    tracing::info!(
        target: "system",
        "session started {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}
