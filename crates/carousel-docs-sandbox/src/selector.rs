//! Choosing and opening one of the sandbox variants of an example.

use std::fmt;
use std::str::FromStr;

use crate::content::ContentProvider;
use crate::examples::{ExampleDefinition, SandboxGenerator};
use crate::link::define_url;
use crate::types::{Flavor, Language, SandboxError};

/// One of the four sandbox variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SandboxKind {
    pub flavor: Flavor,
    pub language: Language,
}

impl SandboxKind {
    /// Every variant, in menu order.
    pub const ALL: [SandboxKind; 4] = [
        Self::new(Flavor::Vanilla, Language::JavaScript),
        Self::new(Flavor::Vanilla, Language::TypeScript),
        Self::new(Flavor::React, Language::JavaScript),
        Self::new(Flavor::React, Language::TypeScript),
    ];

    pub const fn new(flavor: Flavor, language: Language) -> Self {
        Self { flavor, language }
    }

    /// Stable identifier, e.g. `vanilla-ts`.
    pub fn key(&self) -> &'static str {
        match (self.flavor, self.language) {
            (Flavor::Vanilla, Language::JavaScript) => "vanilla-js",
            (Flavor::Vanilla, Language::TypeScript) => "vanilla-ts",
            (Flavor::React, Language::JavaScript) => "react-js",
            (Flavor::React, Language::TypeScript) => "react-ts",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match (self.flavor, self.language) {
            (Flavor::Vanilla, Language::JavaScript) => "Vanilla JavaScript",
            (Flavor::Vanilla, Language::TypeScript) => "Vanilla TypeScript",
            (Flavor::React, Language::JavaScript) => "React JavaScript",
            (Flavor::React, Language::TypeScript) => "React TypeScript",
        }
    }
}

impl FromStr for SandboxKind {
    type Err = SandboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| SandboxError::UnknownSandbox(s.to_string()))
    }
}

impl fmt::Display for SandboxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Opens a generated sandbox link.
pub trait Opener {
    fn open(&self, url: &str) -> Result<(), SandboxError>;
}

/// The sandbox variants offered for one example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxSelector {
    example: String,
    kinds: Vec<SandboxKind>,
}

impl SandboxSelector {
    /// Offer every variant the example has sources for.
    pub fn for_example(example: &ExampleDefinition) -> Self {
        Self {
            example: example.id.clone(),
            kinds: example.kinds(),
        }
    }

    pub fn example(&self) -> &str {
        &self.example
    }

    /// Offered variants, in menu order.
    pub fn kinds(&self) -> &[SandboxKind] {
        &self.kinds
    }

    /// `(key, label)` pairs for display.
    pub fn options(&self) -> Vec<(&'static str, &'static str)> {
        self.kinds.iter().map(|k| (k.key(), k.label())).collect()
    }

    /// Resolve a variant key among the offered ones.
    pub fn select(&self, key: &str) -> Result<SandboxKind, SandboxError> {
        let kind: SandboxKind = key.parse()?;

        if !self.kinds.contains(&kind) {
            return Err(SandboxError::MissingSource {
                example: self.example.clone(),
                kind: kind.key().to_string(),
            });
        }

        Ok(kind)
    }

    /// Generate the define URL of the selected variant.
    pub async fn generate<P: ContentProvider>(
        &self,
        generator: &SandboxGenerator<P>,
        key: &str,
    ) -> Result<String, SandboxError> {
        let kind = self.select(key)?;
        let parameters = generator.parameters(&self.example, kind).await?;
        define_url(&parameters)
    }

    /// Generate the selected variant and hand its URL to `opener`.
    ///
    /// Nothing is opened when generation fails.
    pub async fn open<P: ContentProvider, O: Opener>(
        &self,
        generator: &SandboxGenerator<P>,
        key: &str,
        opener: &O,
    ) -> Result<String, SandboxError> {
        let url = self.generate(generator, key).await?;
        opener.open(&url)?;

        tracing::info!("Opened {} sandbox for {}", key, self.example);

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::examples::tests::generator;
    use crate::link::{decode, DEFINE_ENDPOINT};
    use crate::types::SandboxPath;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingOpener {
        opened: Mutex<Vec<String>>,
    }

    impl Opener for RecordingOpener {
        fn open(&self, url: &str) -> Result<(), SandboxError> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn selector(example: &str) -> SandboxSelector {
        SandboxSelector::for_example(generator().registry().get(example).unwrap())
    }

    #[test]
    fn offers_four_labeled_variants() {
        assert_eq!(
            selector("default").options(),
            vec![
                ("vanilla-js", "Vanilla JavaScript"),
                ("vanilla-ts", "Vanilla TypeScript"),
                ("react-js", "React JavaScript"),
                ("react-ts", "React TypeScript"),
            ]
        );
    }

    #[test]
    fn parses_kind_keys() {
        assert_eq!(
            "React-TS".parse::<SandboxKind>().unwrap(),
            SandboxKind::new(Flavor::React, Language::TypeScript)
        );
        assert!(matches!(
            "svelte-js".parse::<SandboxKind>(),
            Err(SandboxError::UnknownSandbox(_))
        ));
    }

    #[test]
    fn only_offers_variants_with_sources() {
        let mut example = generator().registry().get("default").unwrap().clone();
        example.sources.react_ts = None;

        let selector = SandboxSelector::for_example(&example);

        assert_eq!(selector.kinds().len(), 3);
        assert!(matches!(
            selector.select("react-ts"),
            Err(SandboxError::MissingSource { .. })
        ));
    }

    #[tokio::test]
    async fn opens_generated_link() {
        let generator = generator();
        let opener = RecordingOpener::default();

        let url = selector("default")
            .open(&generator, "vanilla-js", &opener)
            .await
            .unwrap();

        assert_eq!(*opener.opened.lock().unwrap(), vec![url.clone()]);
        let parameters = url
            .strip_prefix(&format!("{DEFINE_ENDPOINT}?parameters="))
            .unwrap();
        let files = decode(parameters).unwrap();
        assert!(files.contains_key(&SandboxPath::root("index.html")));
    }

    #[tokio::test]
    async fn failed_generation_never_opens() {
        let generator = generator();
        let opener = RecordingOpener::default();

        // no TypeScript sources are loaded into the provider
        let result = selector("default")
            .open(&generator, "vanilla-ts", &opener)
            .await;

        assert!(result.is_err());
        assert!(opener.opened.lock().unwrap().is_empty());
    }
}
