//! Raw example source loading.
//!
//! Example scripts are looked up by logical name through a [`ContentProvider`]
//! supplied by the host, so generation never hard-wires where sources live.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Component, Path, PathBuf};

/// Supplies raw text for a logical resource name.
pub trait ContentProvider: Send + Sync {
    /// Load the raw text of `name`.
    fn load(&self, name: &str) -> impl Future<Output = Result<String, ContentError>> + Send;
}

/// Errors that can occur when loading example sources.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Source not found: {0}")]
    NotFound(String),

    #[error("Invalid source name: {0}")]
    InvalidName(String),

    #[error("Failed to read {name}: {message}")]
    Read { name: String, message: String },
}

/// Loads sources from files under a root directory.
#[derive(Debug, Clone)]
pub struct FsContentProvider {
    root: PathBuf,
}

impl FsContentProvider {
    /// Create a provider rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, ContentError> {
        let relative = Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));

        if name.is_empty() || escapes {
            return Err(ContentError::InvalidName(name.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

impl ContentProvider for FsContentProvider {
    fn load(&self, name: &str) -> impl Future<Output = Result<String, ContentError>> + Send {
        let name = name.to_string();
        let path = self.resolve(&name);

        async move {
            let path = path?;
            tracing::debug!("Loading source {}", path.display());

            tokio::fs::read_to_string(&path).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ContentError::NotFound(name)
                } else {
                    ContentError::Read {
                        name,
                        message: e.to_string(),
                    }
                }
            })
        }
    }
}

/// In-memory sources keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentProvider {
    files: HashMap<String, String>,
}

impl MemoryContentProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source, builder style.
    pub fn with(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(name.into(), content.into());
        self
    }

    /// Add a source.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.files.insert(name.into(), content.into());
    }
}

impl ContentProvider for MemoryContentProvider {
    fn load(&self, name: &str) -> impl Future<Output = Result<String, ContentError>> + Send {
        let result = self
            .files
            .get(name)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(name.to_string()));

        async move { result }
    }
}
