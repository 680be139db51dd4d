//! React component-framework sandbox flavor.

use serde_json::Value;

use crate::images::ImageResolver;
use crate::link::encode;
use crate::synth::{
    package_json, prettier_config, stylesheets, to_js_literal, to_json_tab, with_dialect_files,
};
use crate::toolkit::SandboxToolkit;
use crate::types::{
    Flavor, SandboxCreateConfig, SandboxError, SandboxFileEntry, SandboxFileMap, SandboxFolder,
    SandboxPath,
};

/// Build the file map of a React sandbox.
///
/// The caller's script becomes `EmblaCarousel.{jsx,tsx}`; an entry module
/// renders it with the example options and slides.
pub fn build_react_files(
    config: &SandboxCreateConfig,
    toolkit: &SandboxToolkit,
) -> Result<SandboxFileMap, SandboxError> {
    let SandboxToolkit {
        formatter,
        images,
        templates,
    } = toolkit;

    let language = config.language;
    let dialect = language.dialect(Flavor::React);
    let title = Flavor::React.title(&config.id);
    let extension = language.react_extension();

    let manifest = package_json(Flavor::React, language, &title, &config.plugins);
    let options = to_js_literal(&Value::Object(config.options.clone()));
    let entry = templates.react_entry(language, &options, config.slides.len())?;

    let scripts = [
        ("index", entry),
        ("EmblaCarousel", config.carousel_script.clone()),
        ("Header", templates.react_header(&title)?),
        ("Footer", templates.react_footer()?),
    ];

    let mut base = SandboxFileMap::new();
    base.insert(SandboxPath::root(".prettierrc"), prettier_config(formatter)?);
    base.insert(
        SandboxPath::root("package.json"),
        SandboxFileEntry::text(to_json_tab(&manifest)?),
    );
    base.insert(
        SandboxFolder::Public.file("index.html"),
        SandboxFileEntry::text(formatter.format_html(&templates.react_index(&title)?)?),
    );
    base.extend(stylesheets(formatter, &config.styles)?);

    for (name, source) in scripts {
        base.insert(
            SandboxFolder::Js.file(&format!("{name}.{extension}")),
            SandboxFileEntry::text(formatter.format(dialect, &source)?),
        );
    }

    let mut files = with_dialect_files(base, Flavor::React, language, formatter)?.into_file_map();
    files.extend(images.resolve(SandboxFolder::Images));
    files.extend(config.sandbox_overrides.clone());

    tracing::debug!("Built {} with {} files", title, files.len());

    Ok(files)
}

/// Generate the sandbox parameters for a React sandbox.
pub async fn create_sandbox_react(
    config: &SandboxCreateConfig,
    images: ImageResolver,
) -> Result<String, SandboxError> {
    let toolkit = SandboxToolkit::load(images).await?;
    encode(&build_react_files(config, &toolkit)?)
}
