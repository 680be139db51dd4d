//! Initialize sandbox tooling in a docs project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ConfigFile;

macro_rules! starter {
    ($path:literal) => {
        ($path, include_str!(concat!("../../starter/", $path)))
    };
}

/// Starter sources for the built-in examples, relative to the sources dir.
const STARTER_SOURCES: [(&str, &str); 20] = [
    starter!("Vanilla/Default/EmblaCarousel.js"),
    starter!("Vanilla/Default/EmblaCarousel.ts"),
    starter!("Vanilla/ArrowsDots/EmblaCarousel.js"),
    starter!("Vanilla/ArrowsDots/EmblaCarousel.ts"),
    starter!("Vanilla/ArrowsDots/arrows-dots-buttons.js"),
    starter!("Vanilla/ArrowsDots/arrows-dots-buttons.ts"),
    starter!("Vanilla/InfiniteScroll/EmblaCarousel.js"),
    starter!("Vanilla/InfiniteScroll/EmblaCarousel.ts"),
    starter!("Vanilla/InfiniteScroll/infinite-scroll.js"),
    starter!("Vanilla/InfiniteScroll/infinite-scroll.ts"),
    starter!("React/Default/EmblaCarousel.jsx"),
    starter!("React/Default/EmblaCarousel.tsx"),
    starter!("React/ArrowsDots/EmblaCarousel.jsx"),
    starter!("React/ArrowsDots/EmblaCarousel.tsx"),
    starter!("React/ArrowsDots/EmblaCarouselArrowButtons.jsx"),
    starter!("React/ArrowsDots/EmblaCarouselArrowButtons.tsx"),
    starter!("React/ArrowsDots/EmblaCarouselDotButton.jsx"),
    starter!("React/ArrowsDots/EmblaCarouselDotButton.tsx"),
    starter!("React/InfiniteScroll/EmblaCarousel.jsx"),
    starter!("React/InfiniteScroll/EmblaCarousel.tsx"),
];

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing carousel-docs...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    let sources = ConfigFile::resolve(config_path, "sandboxes");
    for (name, content) in STARTER_SOURCES {
        let path = sources.join(name);
        if path.exists() && !yes {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'carousel-docs sandbox default' to open a sandbox.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# carousel-docs configuration

[sandbox]
# Directory holding example sources
sources = "sandboxes"

# Where slide images are served from
image_base_url = "https://www.embla-carousel.com/images"
image_count = 5

# Formatter settings for generated files (optional)
# prettierrc = ".prettierrc"

[docs]
# Documentation pages scanned for routes
dir = "docs"

# Additional examples
# [[examples]]
# id = "autoplay"
# plugins = ["embla-carousel-autoplay"]
# options = { loop = true }
# controls = { dots = true }
#
# [examples.sources.vanilla-js]
# carousel = "Vanilla/Autoplay/EmblaCarousel.js"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config, CONFIG_FILE};
    use carousel_docs_sandbox::{SandboxKind, SandboxSelector};
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_config_and_generatable_sources() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join(CONFIG_FILE);

        run(&config_path, false).await.unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.sandbox.sources, "sandboxes");

        let sources = temp.path().join("sandboxes");
        let generator = config.generator(&config_path).await.unwrap();
        let registry = generator.registry();
        assert_eq!(registry.len(), 3);

        for example in registry.iter() {
            for name in example.sources.names() {
                assert!(sources.join(name).exists(), "{name}");
            }

            let selector = SandboxSelector::for_example(example);
            assert_eq!(selector.kinds(), SandboxKind::ALL);
            for kind in selector.kinds() {
                let url = selector.generate(&generator, kind.key()).await;
                assert!(url.is_ok(), "{} {kind}: {url:?}", example.id);
            }
        }
    }

    #[test]
    fn starter_sources_cover_builtin_examples() {
        let shipped: Vec<&str> = STARTER_SOURCES.iter().map(|(name, _)| *name).collect();
        let registry = carousel_docs_sandbox::ExampleRegistry::builtin();

        for example in registry.iter() {
            for name in example.sources.names() {
                assert!(shipped.contains(&name), "{name}");
            }
        }
    }

    #[tokio::test]
    async fn keeps_existing_config_without_yes() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join(CONFIG_FILE);
        fs::write(&config_path, "[docs]\ndir = \"pages\"\n").unwrap();

        run(&config_path, false).await.unwrap();

        assert_eq!(load_config(&config_path).unwrap().docs.dir, "pages");
    }
}
