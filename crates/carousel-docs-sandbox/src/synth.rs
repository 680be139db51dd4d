//! Auxiliary project files a runnable sandbox needs.

use std::sync::LazyLock;

use carousel_docs_format::{script, Formatter};
use oxc_allocator::Allocator;
use oxc_ast::ast::{BindingPatternKind, Declaration, Statement};
use oxc_parser::Parser;
use oxc_span::{GetSpan, Span};
use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::images::ImageResolver;
use crate::styles::{BASE_CSS, SANDBOX_CSS};
use crate::types::{
    Flavor, Language, SandboxError, SandboxFileEntry, SandboxFileMap, SandboxFiles, SandboxFolder,
};

/// Name of the options binding injected into example scripts.
pub const OPTIONS_BINDING: &str = "OPTIONS";

const CAROUSEL_VERSION: &str = "latest";
const TYPESCRIPT_VERSION: &str = "^5.4.5";

static IMG_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(<img\b[^>]*?\bsrc=")([^"]*)(")"#).expect("Invalid image source regex")
});

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("Invalid identifier regex")
});

/// Serialize a value as JSON indented with tabs.
pub fn to_json_tab<T: Serialize>(value: &T) -> Result<String, SandboxError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

    value
        .serialize(&mut serializer)
        .map_err(|e| SandboxError::Serialize {
            what: "json".to_string(),
            message: e.to_string(),
        })?;

    String::from_utf8(buf).map_err(|e| SandboxError::Serialize {
        what: "json".to_string(),
        message: e.to_string(),
    })
}

/// Dependency manifest for a sandbox.
pub fn package_json(flavor: Flavor, language: Language, title: &str, plugins: &[String]) -> Value {
    let mut dependencies = Map::new();
    let mut dev_dependencies = Map::new();

    let (main, scripts) = match flavor {
        Flavor::Vanilla => {
            dependencies.insert("embla-carousel".into(), json!(CAROUSEL_VERSION));
            dev_dependencies.insert("parcel".into(), json!("^2.12.0"));
            (
                "index.html".to_string(),
                json!({
                    "start": "parcel index.html --open",
                    "build": "parcel build index.html",
                }),
            )
        }
        Flavor::React => {
            dependencies.insert("embla-carousel-react".into(), json!(CAROUSEL_VERSION));
            dependencies.insert("react".into(), json!("^18.2.0"));
            dependencies.insert("react-dom".into(), json!("^18.2.0"));
            dependencies.insert("react-scripts".into(), json!("5.0.1"));
            if language.is_typescript() {
                dev_dependencies.insert("@types/react".into(), json!("^18.2.0"));
                dev_dependencies.insert("@types/react-dom".into(), json!("^18.2.0"));
            }
            (
                format!("src/js/index.{}", language.react_extension()),
                json!({
                    "start": "react-scripts start",
                    "build": "react-scripts build",
                }),
            )
        }
    };

    for plugin in plugins {
        dependencies.insert(plugin.clone(), json!(CAROUSEL_VERSION));
    }

    if language.is_typescript() {
        dev_dependencies.insert("typescript".into(), json!(TYPESCRIPT_VERSION));
    }

    json!({
        "name": title,
        "version": "1.0.0",
        "private": true,
        "main": main,
        "scripts": scripts,
        "dependencies": dependencies,
        "devDependencies": dev_dependencies,
    })
}

/// TypeScript compiler configuration.
pub fn ts_config(flavor: Flavor) -> Value {
    let mut compiler_options = json!({
        "target": "ES2020",
        "module": "ESNext",
        "moduleResolution": "node",
        "lib": ["DOM", "DOM.Iterable", "ESNext"],
        "strict": true,
        "esModuleInterop": true,
        "skipLibCheck": true,
        "forceConsistentCasingInFileNames": true,
        "noEmit": true,
    });

    if flavor == Flavor::React {
        compiler_options["jsx"] = json!("react-jsx");
        compiler_options["allowSyntheticDefaultImports"] = json!(true);
    }

    json!({
        "compilerOptions": compiler_options,
        "include": ["src", SandboxFiles::DECLARATIONS],
    })
}

/// Module declarations for asset imports.
pub fn ts_declarations() -> &'static str {
    "declare module '*.css'\ndeclare module '*.jpg'\n"
}

/// Render a JSON object as a JavaScript object literal.
///
/// Keys that are valid identifiers are left unquoted.
pub fn to_js_literal(value: &Value) -> String {
    match value {
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| {
                    let key = if IDENTIFIER_RE.is_match(key) {
                        key.clone()
                    } else {
                        Value::String(key.clone()).to_string()
                    };
                    format!("{key}: {}", to_js_literal(value))
                })
                .collect();
            format!("{{ {} }}", entries.join(", "))
        }
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(to_js_literal).collect();
            format!("[{}]", items.join(", "))
        }
        other => other.to_string(),
    }
}

/// Inject carousel options into a vanilla example script.
///
/// A top-level `OPTIONS` binding (`const`, `let` or `var`, exported or not)
/// gets the options as its initializer; otherwise `const OPTIONS = …` is
/// prepended. Importing `OPTIONS` leaves nowhere to inject and is rejected.
pub fn inject_options(
    script: &str,
    options: &Map<String, Value>,
    language: Language,
) -> Result<String, SandboxError> {
    let literal = to_js_literal(&Value::Object(options.clone()));
    let source_type = script::source_type(language.dialect(Flavor::Vanilla));

    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, script, source_type).parse();

    if let Some(error) = parsed.errors.first() {
        return Err(SandboxError::InvalidScript(error.to_string()));
    }

    let mut target = None;
    for statement in &parsed.program.body {
        let declaration = match statement {
            Statement::VariableDeclaration(declaration) => declaration,
            Statement::ExportNamedDeclaration(export) => match &export.declaration {
                Some(Declaration::VariableDeclaration(declaration)) => declaration,
                _ => continue,
            },
            Statement::ImportDeclaration(import) => {
                let imports_options = import.specifiers.iter().flatten().any(|specifier| {
                    specifier.local().name.as_str() == OPTIONS_BINDING
                });
                if imports_options {
                    return Err(SandboxError::InvalidScript(format!(
                        "{OPTIONS_BINDING} is imported and cannot be replaced"
                    )));
                }
                continue;
            }
            _ => continue,
        };

        target = declaration.declarations.iter().find_map(|declarator| {
            let BindingPatternKind::BindingIdentifier(ident) = &declarator.id.kind else {
                return None;
            };
            (ident.name.as_str() == OPTIONS_BINDING).then(|| match &declarator.init {
                Some(init) => Injection::Replace(init.span()),
                None => Injection::Initialize(declarator.span.end),
            })
        });

        if target.is_some() {
            break;
        }
    }

    Ok(match target {
        Some(Injection::Replace(span)) => {
            let (start, end) = (span.start as usize, span.end as usize);
            format!("{}{}{}", &script[..start], literal, &script[end..])
        }
        Some(Injection::Initialize(at)) => {
            let at = at as usize;
            format!("{} = {}{}", &script[..at], literal, &script[at..])
        }
        None => format!("const {OPTIONS_BINDING} = {literal}\n{script}"),
    })
}

enum Injection {
    Replace(Span),
    Initialize(u32),
}

/// Point `<img src>` attributes at the sandbox copies of known images.
pub fn rewrite_image_paths(html: &str, images: &ImageResolver) -> String {
    IMG_SRC_RE
        .replace_all(html, |caps: &Captures| {
            let src = &caps[2];
            let file_name = src.rsplit('/').next().unwrap_or(src);

            if images.contains(file_name) {
                let local = SandboxFolder::Images.file(file_name);
                format!("{}./{}{}", &caps[1], local, &caps[3])
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// `.prettierrc` mirroring the formatter configuration.
pub fn prettier_config(formatter: &Formatter) -> Result<SandboxFileEntry, SandboxError> {
    Ok(SandboxFileEntry::text(to_json_tab(formatter.config())?))
}

/// The three stylesheets every sandbox ships.
pub fn stylesheets(formatter: &Formatter, styles: &str) -> Result<SandboxFileMap, SandboxError> {
    let mut files = SandboxFileMap::new();

    for (name, css) in [
        ("base.css", BASE_CSS),
        ("sandbox.css", SANDBOX_CSS),
        ("embla.css", styles),
    ] {
        files.insert(
            SandboxFolder::Css.file(name),
            SandboxFileEntry::text(formatter.format_css(css)?),
        );
    }

    Ok(files)
}

/// Attach the TypeScript files when the dialect is typed.
pub fn with_dialect_files(
    base: SandboxFileMap,
    flavor: Flavor,
    language: Language,
    formatter: &Formatter,
) -> Result<SandboxFiles, SandboxError> {
    if !language.is_typescript() {
        return Ok(SandboxFiles::Untyped { base });
    }

    Ok(SandboxFiles::Typed {
        base,
        ts_config: SandboxFileEntry::text(to_json_tab(&ts_config(flavor))?),
        declarations: SandboxFileEntry::text(formatter.format_ts(ts_declarations())?),
    })
}
