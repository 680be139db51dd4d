//! Sandbox project generation for carousel documentation examples.
//!
//! An example's raw sources are loaded through a [`ContentProvider`], turned
//! into a [`SandboxFileMap`] by the vanilla or React builder, and encoded into
//! CodeSandbox define parameters.
//!
//! # Example
//!
//! ```ignore
//! use carousel_docs_sandbox::{
//!     ExampleRegistry, FsContentProvider, ImageResolver, SandboxGenerator, SandboxSelector,
//!     SandboxToolkit,
//! };
//!
//! let toolkit = SandboxToolkit::load(ImageResolver::default()).await?;
//! let generator = SandboxGenerator::new(
//!     ExampleRegistry::builtin(),
//!     FsContentProvider::new("sandboxes"),
//!     toolkit,
//! );
//! let selector = SandboxSelector::for_example(generator.registry().get("default")?);
//! let url = selector.generate(&generator, "react-ts").await?;
//! ```

pub mod content;
pub mod examples;
pub mod images;
pub mod link;
pub mod react;
pub mod selector;
pub mod styles;
pub mod synth;
pub mod templates;
pub mod toolkit;
pub mod types;
pub mod vanilla;

pub use content::{ContentError, ContentProvider, FsContentProvider, MemoryContentProvider};
pub use examples::{
    ExampleDefinition, ExampleRegistry, ExampleSources, SandboxGenerator, SourceSet,
};
pub use images::ImageResolver;
pub use link::{decode, define_url, encode};
pub use react::{build_react_files, create_sandbox_react};
pub use selector::{Opener, SandboxKind, SandboxSelector};
pub use templates::{MarkupControls, SandboxTemplates};
pub use toolkit::SandboxToolkit;
pub use types::{
    Flavor, Language, SandboxCreateConfig, SandboxError, SandboxFileEntry, SandboxFileMap,
    SandboxFiles, SandboxFolder, SandboxPath,
};
pub use vanilla::{build_vanilla_files, create_sandbox_vanilla};
