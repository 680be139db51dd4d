//! Plain-script sandbox flavor.

use crate::images::ImageResolver;
use crate::link::encode;
use crate::synth::{
    inject_options, package_json, prettier_config, rewrite_image_paths, stylesheets, to_json_tab,
    with_dialect_files,
};
use crate::toolkit::SandboxToolkit;
use crate::types::{
    Flavor, SandboxCreateConfig, SandboxError, SandboxFileEntry, SandboxFileMap, SandboxFolder,
    SandboxPath,
};

/// Build the file map of a vanilla sandbox.
///
/// Images and then the caller's overrides are merged last, so an override
/// replaces any generated file at the same path.
pub fn build_vanilla_files(
    config: &SandboxCreateConfig,
    toolkit: &SandboxToolkit,
) -> Result<SandboxFileMap, SandboxError> {
    let SandboxToolkit {
        formatter,
        images,
        templates,
    } = toolkit;

    let language = config.language;
    let title = Flavor::Vanilla.title(&config.id);
    let extension = language.vanilla_extension();

    let manifest = package_json(Flavor::Vanilla, language, &title, &config.plugins);
    let entry_script = inject_options(&config.carousel_script, &config.options, language)?;
    let carousel_html = rewrite_image_paths(&config.carousel_html, images);
    let entry_html = templates.vanilla_index(&title, extension, &carousel_html)?;

    let mut base = SandboxFileMap::new();
    base.insert(SandboxPath::root(".prettierrc"), prettier_config(formatter)?);
    base.insert(
        SandboxPath::root("package.json"),
        SandboxFileEntry::text(to_json_tab(&manifest)?),
    );
    base.insert(
        SandboxPath::root("index.html"),
        SandboxFileEntry::text(formatter.format_html(&entry_html)?),
    );
    base.extend(stylesheets(formatter, &config.styles)?);
    base.insert(
        SandboxFolder::Js.file(&format!("index.{extension}")),
        SandboxFileEntry::text(formatter.format(language.dialect(Flavor::Vanilla), &entry_script)?),
    );

    let mut files = with_dialect_files(base, Flavor::Vanilla, language, formatter)?.into_file_map();
    files.extend(images.resolve(SandboxFolder::Images));
    files.extend(config.sandbox_overrides.clone());

    tracing::debug!("Built {} with {} files", title, files.len());

    Ok(files)
}

/// Generate the sandbox parameters for a vanilla sandbox.
pub async fn create_sandbox_vanilla(
    config: &SandboxCreateConfig,
    images: ImageResolver,
) -> Result<String, SandboxError> {
    let toolkit = SandboxToolkit::load(images).await?;
    encode(&build_vanilla_files(config, &toolkit)?)
}
