//! Configuration file (carousel-docs.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use carousel_docs_format::Formatter;
use carousel_docs_sandbox::images::{DEFAULT_IMAGE_BASE_URL, DEFAULT_IMAGE_COUNT};
use carousel_docs_sandbox::{
    ExampleDefinition, ExampleRegistry, FsContentProvider, ImageResolver, SandboxGenerator,
    SandboxToolkit,
};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "carousel-docs.toml";

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub sandbox: SandboxSettings,
    #[serde(default)]
    pub docs: DocsSettings,
    /// Examples added to (or replacing) the built-in ones
    #[serde(default)]
    pub examples: Vec<ExampleDefinition>,
}

#[derive(Debug, Deserialize)]
pub struct SandboxSettings {
    /// Directory holding example sources
    #[serde(default = "default_sources")]
    pub sources: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_image_count")]
    pub image_count: usize,
    /// Optional `.prettierrc` used for generated files
    pub prettierrc: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DocsSettings {
    #[serde(default = "default_docs_dir")]
    pub dir: String,
}

impl Default for SandboxSettings {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            image_base_url: default_image_base_url(),
            image_count: default_image_count(),
            prettierrc: None,
        }
    }
}

impl Default for DocsSettings {
    fn default() -> Self {
        Self {
            dir: default_docs_dir(),
        }
    }
}

fn default_sources() -> String {
    "sandboxes".to_string()
}
fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}
fn default_image_count() -> usize {
    DEFAULT_IMAGE_COUNT
}
fn default_docs_dir() -> String {
    "docs".to_string()
}

/// Load the config file if it exists.
/// Returns an error if the file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}

impl ConfigFile {
    /// Paths in the config are relative to the directory holding it.
    pub fn resolve(config_path: &Path, relative: &str) -> PathBuf {
        config_path
            .parent()
            .unwrap_or(Path::new(""))
            .join(relative)
    }

    /// Built-in examples plus the configured ones.
    pub fn registry(&self) -> ExampleRegistry {
        let mut registry = ExampleRegistry::builtin();
        for example in &self.examples {
            registry.register(example.clone());
        }
        registry
    }

    pub fn images(&self) -> ImageResolver {
        ImageResolver::new(&self.sandbox.image_base_url, self.sandbox.image_count)
    }

    /// Sandbox generator reading sources relative to `config_path`.
    pub async fn generator(&self, config_path: &Path) -> Result<SandboxGenerator<FsContentProvider>> {
        let formatter = match &self.sandbox.prettierrc {
            Some(path) => Formatter::load_from(&Self::resolve(config_path, path)).await?,
            None => Formatter::load().await?,
        };

        let sources = Self::resolve(config_path, &self.sandbox.sources);

        Ok(SandboxGenerator::new(
            self.registry(),
            FsContentProvider::new(sources),
            SandboxToolkit::new(formatter, self.images()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join(CONFIG_FILE)).unwrap();

        assert_eq!(config.sandbox.sources, "sandboxes");
        assert_eq!(config.sandbox.image_count, 5);
        assert_eq!(config.docs.dir, "docs");
        assert_eq!(config.registry().len(), 3);
    }

    #[test]
    fn parses_examples_and_settings() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
[sandbox]
image_count = 3

[[examples]]
id = "autoplay"
slides = 4
plugins = ["embla-carousel-autoplay"]
options = { loop = true }
controls = { dots = true }

[examples.sources.vanilla-js]
carousel = "Vanilla/Autoplay/EmblaCarousel.js"
extra = ["Vanilla/Autoplay/EmblaCarouselDotButton.js"]
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        let registry = config.registry();
        let autoplay = registry.get("autoplay").unwrap();

        assert_eq!(config.sandbox.image_count, 3);
        assert_eq!(config.sandbox.sources, "sandboxes");
        assert_eq!(registry.len(), 4);
        assert_eq!(autoplay.slides, 4);
        assert_eq!(autoplay.options["loop"], true);
        assert!(autoplay.controls.dots);
        assert_eq!(autoplay.kinds().len(), 1);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "[sandbox\n").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn paths_resolve_next_to_config() {
        let path = Path::new("site/carousel-docs.toml");

        assert_eq!(
            ConfigFile::resolve(path, "sandboxes"),
            PathBuf::from("site/sandboxes")
        );
    }
}
