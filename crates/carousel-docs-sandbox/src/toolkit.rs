//! Shared generation dependencies.

use carousel_docs_format::Formatter;

use crate::images::ImageResolver;
use crate::templates::SandboxTemplates;
use crate::types::SandboxError;

/// Everything a file map builder needs besides its config.
pub struct SandboxToolkit {
    pub formatter: Formatter,
    pub images: ImageResolver,
    pub templates: SandboxTemplates,
}

impl SandboxToolkit {
    /// Load the formatters and bundle them with `images`.
    pub async fn load(images: ImageResolver) -> Result<Self, SandboxError> {
        let formatter = Formatter::load().await?;
        Ok(Self::new(formatter, images))
    }

    /// Bundle an already loaded formatter.
    pub fn new(formatter: Formatter, images: ImageResolver) -> Self {
        Self {
            formatter,
            images,
            templates: SandboxTemplates::new(),
        }
    }
}
