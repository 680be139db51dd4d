//! Documented examples and sandbox generation from their sources.

use std::collections::BTreeMap;

use futures::future::try_join_all;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::content::ContentProvider;
use crate::link::encode;
use crate::react::build_react_files;
use crate::selector::SandboxKind;
use crate::styles::{EMBLA_CSS, INFINITE_SCROLL_CSS};
use crate::templates::MarkupControls;
use crate::toolkit::SandboxToolkit;
use crate::types::{
    Flavor, Language, SandboxCreateConfig, SandboxError, SandboxFileEntry, SandboxFileMap,
    SandboxFolder,
};
use crate::vanilla::build_vanilla_files;

fn default_slide_count() -> u32 {
    5
}

/// Source files of one sandbox kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceSet {
    /// Carousel script (vanilla entry or React `EmblaCarousel` component)
    pub carousel: String,

    /// Supporting modules copied into `src/js/`
    #[serde(default)]
    pub extra: Vec<String>,
}

/// Source files per sandbox kind. Kinds without sources are not offered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExampleSources {
    pub vanilla_js: Option<SourceSet>,
    pub vanilla_ts: Option<SourceSet>,
    pub react_js: Option<SourceSet>,
    pub react_ts: Option<SourceSet>,
}

impl ExampleSources {
    /// Sources laid out as `Vanilla/<dir>/` and `React/<dir>/`, one file per
    /// module name and dialect. Each flavor lists its own supporting modules.
    pub fn conventional(dir: &str, vanilla_extra: &[&str], react_extra: &[&str]) -> Self {
        let set = |flavor: &str, extra: &[&str], extension: &str| SourceSet {
            carousel: format!("{flavor}/{dir}/EmblaCarousel.{extension}"),
            extra: extra
                .iter()
                .map(|name| format!("{flavor}/{dir}/{name}.{extension}"))
                .collect(),
        };

        Self {
            vanilla_js: Some(set("Vanilla", vanilla_extra, "js")),
            vanilla_ts: Some(set("Vanilla", vanilla_extra, "ts")),
            react_js: Some(set("React", react_extra, "jsx")),
            react_ts: Some(set("React", react_extra, "tsx")),
        }
    }

    /// Every source name referenced, carousel scripts first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [&self.vanilla_js, &self.vanilla_ts, &self.react_js, &self.react_ts]
            .into_iter()
            .flatten()
            .flat_map(|set| std::iter::once(&set.carousel).chain(&set.extra))
            .map(String::as_str)
    }

    /// Sources of `kind`, if provided.
    pub fn get(&self, kind: SandboxKind) -> Option<&SourceSet> {
        match (kind.flavor, kind.language) {
            (Flavor::Vanilla, Language::JavaScript) => self.vanilla_js.as_ref(),
            (Flavor::Vanilla, Language::TypeScript) => self.vanilla_ts.as_ref(),
            (Flavor::React, Language::JavaScript) => self.react_js.as_ref(),
            (Flavor::React, Language::TypeScript) => self.react_ts.as_ref(),
        }
    }
}

/// A documented carousel example.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExampleDefinition {
    /// Unique id, also the sandbox title prefix
    pub id: String,

    /// Number of slides rendered
    #[serde(default = "default_slide_count")]
    pub slides: u32,

    /// Carousel options
    #[serde(default)]
    pub options: Map<String, Value>,

    /// Example stylesheet; the stock carousel styles when absent
    #[serde(default)]
    pub styles: Option<String>,

    /// Extra npm packages
    #[serde(default)]
    pub plugins: Vec<String>,

    #[serde(default)]
    pub controls: MarkupControls,

    #[serde(default)]
    pub sources: ExampleSources,
}

impl ExampleDefinition {
    /// Zero-based slide indices.
    pub fn slide_indices(&self) -> Vec<u32> {
        (0..self.slides).collect()
    }

    /// Stylesheet shipped as `embla.css`.
    pub fn stylesheet(&self) -> &str {
        self.styles.as_deref().unwrap_or(EMBLA_CSS)
    }

    /// Sandbox kinds this example has sources for.
    pub fn kinds(&self) -> Vec<SandboxKind> {
        SandboxKind::ALL
            .into_iter()
            .filter(|kind| self.sources.get(*kind).is_some())
            .collect()
    }
}

/// Examples by id.
#[derive(Debug, Clone, Default)]
pub struct ExampleRegistry {
    examples: BTreeMap<String, ExampleDefinition>,
}

impl ExampleRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the stock documentation examples.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register(ExampleDefinition {
            id: "default".to_string(),
            slides: 5,
            options: Map::new(),
            styles: None,
            plugins: Vec::new(),
            controls: MarkupControls::default(),
            sources: ExampleSources::conventional("Default", &[], &[]),
        });

        registry.register(ExampleDefinition {
            id: "arrows-dots".to_string(),
            slides: 5,
            options: Map::new(),
            styles: None,
            plugins: Vec::new(),
            controls: MarkupControls {
                arrows: true,
                dots: true,
                infinite_scroll: false,
            },
            sources: ExampleSources::conventional(
                "ArrowsDots",
                &["arrows-dots-buttons"],
                &["EmblaCarouselArrowButtons", "EmblaCarouselDotButton"],
            ),
        });

        let infinite_options = json!({
            "dragFree": true,
            "containScroll": "keepSnaps",
            "watchSlides": false,
            "watchResize": false,
        });
        registry.register(ExampleDefinition {
            id: "infinite-scroll".to_string(),
            slides: 5,
            options: infinite_options.as_object().cloned().unwrap_or_default(),
            styles: Some(format!("{EMBLA_CSS}{INFINITE_SCROLL_CSS}")),
            plugins: Vec::new(),
            controls: MarkupControls {
                arrows: true,
                dots: false,
                infinite_scroll: true,
            },
            sources: ExampleSources::conventional("InfiniteScroll", &["infinite-scroll"], &[]),
        });

        registry
    }

    /// Add an example, replacing one with the same id.
    pub fn register(&mut self, example: ExampleDefinition) {
        if self.examples.contains_key(&example.id) {
            tracing::debug!("Replacing example {}", example.id);
        }
        self.examples.insert(example.id.clone(), example);
    }

    /// Look up an example.
    pub fn get(&self, id: &str) -> Result<&ExampleDefinition, SandboxError> {
        self.examples
            .get(id)
            .ok_or_else(|| SandboxError::UnknownExample(id.to_string()))
    }

    /// Example ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.examples.keys().map(String::as_str)
    }

    /// Examples in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ExampleDefinition> {
        self.examples.values()
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

/// Generates sandboxes for registered examples, loading their sources from
/// a [`ContentProvider`].
pub struct SandboxGenerator<P> {
    registry: ExampleRegistry,
    provider: P,
    toolkit: SandboxToolkit,
}

impl<P: ContentProvider> SandboxGenerator<P> {
    pub fn new(registry: ExampleRegistry, provider: P, toolkit: SandboxToolkit) -> Self {
        Self {
            registry,
            provider,
            toolkit,
        }
    }

    pub fn registry(&self) -> &ExampleRegistry {
        &self.registry
    }

    pub fn toolkit(&self) -> &SandboxToolkit {
        &self.toolkit
    }

    /// Build the file map of `example` as `kind`.
    pub async fn files(
        &self,
        example: &str,
        kind: SandboxKind,
    ) -> Result<SandboxFileMap, SandboxError> {
        let definition = self.registry.get(example)?;
        let sources = definition
            .sources
            .get(kind)
            .ok_or_else(|| SandboxError::MissingSource {
                example: example.to_string(),
                kind: kind.key().to_string(),
            })?;

        let (carousel_script, extras) = tokio::try_join!(
            self.provider.load(&sources.carousel),
            try_join_all(sources.extra.iter().map(|name| self.provider.load(name))),
        )?;

        let dialect = kind.language.dialect(kind.flavor);
        let mut sandbox_overrides = SandboxFileMap::new();
        for (name, source) in sources.extra.iter().zip(extras) {
            let file_name = name.rsplit('/').next().unwrap_or(name);
            sandbox_overrides.insert(
                SandboxFolder::Js.file(file_name),
                SandboxFileEntry::text(self.toolkit.formatter.format(dialect, &source)?),
            );
        }

        let slides = definition.slide_indices();
        let carousel_html = match kind.flavor {
            Flavor::Vanilla => self.toolkit.templates.carousel_markup(
                &slides,
                &definition.controls,
                &self.toolkit.images,
            )?,
            Flavor::React => String::new(),
        };

        let config = SandboxCreateConfig {
            id: definition.id.clone(),
            carousel_script,
            carousel_html,
            options: definition.options.clone(),
            styles: definition.stylesheet().to_string(),
            slides,
            plugins: definition.plugins.clone(),
            sandbox_overrides,
            language: kind.language,
        };

        tracing::info!("Generating {} sandbox for {}", kind.label(), example);

        match kind.flavor {
            Flavor::Vanilla => build_vanilla_files(&config, &self.toolkit),
            Flavor::React => build_react_files(&config, &self.toolkit),
        }
    }

    /// Define parameters of `example` as `kind`.
    pub async fn parameters(&self, example: &str, kind: SandboxKind) -> Result<String, SandboxError> {
        encode(&self.files(example, kind).await?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::content::MemoryContentProvider;
    use crate::images::ImageResolver;
    use crate::types::SandboxPath;
    use carousel_docs_format::{Formatter, FormatterConfig};
    use pretty_assertions::assert_eq;

    pub(crate) fn provider() -> MemoryContentProvider {
        MemoryContentProvider::new()
            .with(
                "Vanilla/Default/EmblaCarousel.js",
                "import EmblaCarousel from 'embla-carousel'\n\nconst OPTIONS = {}\nconst viewport = document.querySelector('.embla__viewport')\nEmblaCarousel(viewport, OPTIONS)\n",
            )
            .with(
                "React/Default/EmblaCarousel.jsx",
                "import React from 'react'\nimport useEmblaCarousel from 'embla-carousel-react'\n\nexport default function EmblaCarousel({ slides, options }) {\n  const [emblaRef] = useEmblaCarousel(options)\n  return <div className=\"embla\" ref={emblaRef}>{slides.length}</div>\n}\n",
            )
            .with(
                "Vanilla/InfiniteScroll/EmblaCarousel.js",
                "import EmblaCarousel from 'embla-carousel'\nimport { setupInfiniteScroll } from './infinite-scroll'\n\nconst OPTIONS = {}\nconst emblaApi = EmblaCarousel(document.querySelector('.embla__viewport'), OPTIONS)\nsetupInfiniteScroll(emblaApi)\n",
            )
            .with(
                "Vanilla/InfiniteScroll/infinite-scroll.js",
                "export const setupInfiniteScroll = (emblaApi) => { emblaApi.on('scroll', () => {}) }\n",
            )
    }

    pub(crate) fn generator() -> SandboxGenerator<MemoryContentProvider> {
        SandboxGenerator::new(
            ExampleRegistry::builtin(),
            provider(),
            SandboxToolkit::new(
                Formatter::with_config(FormatterConfig::default()),
                ImageResolver::default(),
            ),
        )
    }

    fn kind(key: &str) -> SandboxKind {
        key.parse().unwrap()
    }

    fn path(p: &str) -> SandboxPath {
        SandboxPath::parse(p).unwrap()
    }

    #[test]
    fn builtin_examples_are_registered() {
        let registry = ExampleRegistry::builtin();

        assert_eq!(
            registry.ids().collect::<Vec<_>>(),
            vec!["arrows-dots", "default", "infinite-scroll"]
        );
        let infinite = registry.get("infinite-scroll").unwrap();
        assert_eq!(infinite.options["containScroll"], "keepSnaps");
        assert_eq!(
            infinite.sources.vanilla_js.as_ref().unwrap().extra,
            vec!["Vanilla/InfiniteScroll/infinite-scroll.js"]
        );
        assert!(infinite.sources.react_ts.as_ref().unwrap().extra.is_empty());

        let arrows = registry.get("arrows-dots").unwrap();
        assert_eq!(
            arrows.sources.vanilla_ts.as_ref().unwrap().extra,
            vec!["Vanilla/ArrowsDots/arrows-dots-buttons.ts"]
        );
        assert_eq!(arrows.sources.names().count(), 10);
    }

    #[test]
    fn unknown_example_fails() {
        let registry = ExampleRegistry::builtin();

        assert!(matches!(
            registry.get("parallax"),
            Err(SandboxError::UnknownExample(id)) if id == "parallax"
        ));
    }

    #[test]
    fn parses_configured_examples() {
        let example: ExampleDefinition = serde_json::from_value(json!({
            "id": "autoplay",
            "options": { "loop": true },
            "plugins": ["embla-carousel-autoplay"],
            "controls": { "dots": true },
            "sources": {
                "vanilla-js": { "carousel": "Vanilla/Autoplay/EmblaCarousel.js" }
            }
        }))
        .unwrap();

        assert_eq!(example.slides, 5);
        assert!(example.controls.dots);
        assert!(!example.controls.arrows);
        assert_eq!(example.kinds(), vec![kind("vanilla-js")]);
        assert_eq!(example.stylesheet(), EMBLA_CSS);
    }

    #[test]
    fn registering_replaces_existing_id() {
        let mut registry = ExampleRegistry::builtin();
        let mut replacement = registry.get("default").unwrap().clone();
        replacement.slides = 8;

        registry.register(replacement);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("default").unwrap().slides, 8);
    }

    #[tokio::test]
    async fn generates_vanilla_sandbox_from_sources() {
        let files = generator().files("default", kind("vanilla-js")).await.unwrap();

        let index = &files[&path("index.html")].content;
        assert_eq!(index.matches("class=\"embla__slide\"").count(), 5);
        assert!(index.contains("./src/images/slide-1.jpg"));
        assert!(files[&path("src/js/index.js")]
            .content
            .contains("EmblaCarousel(viewport, OPTIONS)"));
    }

    #[tokio::test]
    async fn extra_sources_become_script_overrides() {
        let files = generator()
            .files("infinite-scroll", kind("vanilla-js"))
            .await
            .unwrap();

        let extra = &files[&path("src/js/infinite-scroll.js")];
        assert!(!extra.is_binary);
        assert!(extra.content.contains("setupInfiniteScroll"));
        assert!(files[&path("src/js/index.js")].content.contains("dragFree: true"));
        assert!(files[&path("src/css/embla.css")]
            .content
            .contains(".embla-infinite-scroll"));
    }

    #[tokio::test]
    async fn generates_react_sandbox_from_sources() {
        let files = generator().files("default", kind("react-js")).await.unwrap();

        assert!(files[&path("src/js/EmblaCarousel.jsx")]
            .content
            .contains("useEmblaCarousel(options)"));
        assert!(files[&path("src/js/index.jsx")]
            .content
            .contains("SLIDE_COUNT = 5"));
    }

    #[tokio::test]
    async fn missing_source_propagates() {
        let result = generator().files("default", kind("vanilla-ts")).await;

        assert!(matches!(
            result,
            Err(SandboxError::Content(crate::content::ContentError::NotFound(name)))
                if name == "Vanilla/Default/EmblaCarousel.ts"
        ));
    }

    #[tokio::test]
    async fn parameters_are_deterministic() {
        let generator = generator();

        let first = generator.parameters("default", kind("react-js")).await.unwrap();
        let second = generator.parameters("default", kind("react-js")).await.unwrap();

        assert_eq!(first, second);
    }
}
