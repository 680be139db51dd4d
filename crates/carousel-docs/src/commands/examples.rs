//! Example listing command.

use std::path::Path;

use anyhow::Result;

use crate::config::{load_config, ConfigFile};

/// Run the examples command.
pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let sources = ConfigFile::resolve(config_path, &config.sandbox.sources);

    for example in config.registry().iter() {
        let kinds: Vec<&str> = example.kinds().iter().map(|k| k.key()).collect();
        println!("{:<20} {}", example.id, kinds.join(", "));

        for name in example.sources.names() {
            if !sources.join(name).exists() {
                tracing::warn!("{}: missing source {}", example.id, name);
            }
        }
    }

    Ok(())
}
