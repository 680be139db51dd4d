//! Navigation routes command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use carousel_docs_routes::{build_route_tree, flatten, scan_docs, MdxAllRoutes};

use crate::config::{load_config, ConfigFile};

/// Run the routes command.
pub async fn run(config_path: &Path, input: Option<PathBuf>, flat: bool) -> Result<()> {
    let data = match input {
        Some(path) => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<MdxAllRoutes>(&raw)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => {
            let config = load_config(config_path)?;
            scan_docs(&ConfigFile::resolve(config_path, &config.docs.dir))?
        }
    };

    let routes = flatten(&data);
    tracing::info!("Found {} routes", routes.len());

    let json = if flat {
        serde_json::to_string_pretty(&routes)?
    } else {
        serde_json::to_string_pretty(&build_route_tree(&routes)?)?
    };

    println!("{json}");

    Ok(())
}
