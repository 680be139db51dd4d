//! File map dump command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use carousel_docs_sandbox::SandboxKind;

use crate::config::load_config;

/// Run the files command.
pub async fn run(
    config_path: &Path,
    example: &str,
    kind: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let kind: SandboxKind = kind.parse()?;
    let config = load_config(config_path)?;
    let generator = config.generator(config_path).await?;

    let files = generator.files(example, kind).await?;
    let json = serde_json::to_string_pretty(&files).context("Failed to serialize file map")?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} files to {}", files.len(), path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
