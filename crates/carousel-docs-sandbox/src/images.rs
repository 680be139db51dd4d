//! Slide images embedded in generated sandboxes.

use crate::types::{SandboxFileEntry, SandboxFileMap, SandboxFolder};

/// Default location of the slide images served by the documentation site.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://www.embla-carousel.com/images";

/// Number of distinct slide images.
pub const DEFAULT_IMAGE_COUNT: usize = 5;

/// Resolves the slide images a sandbox embeds.
///
/// Images are binary entries pointing at the hosted originals; the sandbox
/// service downloads them when the project is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    base_url: String,
    count: usize,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL, DEFAULT_IMAGE_COUNT)
    }
}

impl ImageResolver {
    /// Create a resolver for `count` images under `base_url`.
    pub fn new(base_url: impl Into<String>, count: usize) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            count: count.max(1),
        }
    }

    /// Image base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of distinct images.
    pub fn count(&self) -> usize {
        self.count
    }

    /// File name of the image shown on slide `index` (zero based). Images repeat
    /// when there are more slides than images.
    pub fn file_name(&self, index: usize) -> String {
        format!("slide-{}.jpg", index % self.count + 1)
    }

    /// Hosted URL of the image shown on slide `index`.
    pub fn url(&self, index: usize) -> String {
        format!("{}/{}", self.base_url, self.file_name(index))
    }

    /// Whether `file_name` is one of the resolved images.
    pub fn contains(&self, file_name: &str) -> bool {
        (0..self.count).any(|i| self.file_name(i) == file_name)
    }

    /// Image entries placed inside `folder`.
    pub fn resolve(&self, folder: SandboxFolder) -> SandboxFileMap {
        (0..self.count)
            .map(|i| {
                (
                    folder.file(&self.file_name(i)),
                    SandboxFileEntry::binary(self.url(i)),
                )
            })
            .collect()
    }
}
