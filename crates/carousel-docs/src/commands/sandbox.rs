//! Sandbox link command.

use std::path::Path;

use anyhow::Result;
use carousel_docs_sandbox::{Opener, SandboxError, SandboxSelector};

use crate::config::load_config;

/// Opens links in the default browser.
pub struct BrowserOpener;

impl Opener for BrowserOpener {
    fn open(&self, url: &str) -> Result<(), SandboxError> {
        open::that(url).map_err(|e| SandboxError::Open {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Run the sandbox command.
pub async fn run(config_path: &Path, example: &str, kind: &str, open: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let generator = config.generator(config_path).await?;
    let selector = SandboxSelector::for_example(generator.registry().get(example)?);

    let url = if open {
        selector.open(&generator, kind, &BrowserOpener).await?
    } else {
        selector.generate(&generator, kind).await?
    };

    println!("{url}");

    Ok(())
}
