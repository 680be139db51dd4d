//! Formatter loading and dispatch.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::{html, script, style};

/// Text dialect a formatter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Html,
    Css,
    /// JavaScript, JSX allowed
    JavaScript,
    /// Plain TypeScript (`.ts`)
    TypeScript,
    /// TypeScript with JSX (`.tsx`)
    TypeScriptJsx,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::TypeScriptJsx => "typescript-jsx",
        };
        f.write_str(name)
    }
}

/// Trailing comma policy, serialized the way `.prettierrc` expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingComma {
    #[default]
    All,
    Es5,
    None,
}

/// Shared formatting configuration.
///
/// Serialized as-is into the `.prettierrc` of every generated sandbox, so the
/// field names follow that file's conventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatterConfig {
    /// Preferred line width
    pub print_width: usize,

    /// Spaces per indentation level
    pub tab_width: usize,

    /// Indent with tabs instead of spaces
    pub use_tabs: bool,

    /// Terminate statements with semicolons
    pub semi: bool,

    /// Prefer single quotes in scripts
    pub single_quote: bool,

    /// Trailing comma policy
    pub trailing_comma: TrailingComma,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            print_width: 80,
            tab_width: 2,
            use_tabs: false,
            semi: true,
            single_quote: true,
            trailing_comma: TrailingComma::All,
        }
    }
}

impl FormatterConfig {
    /// One level of indentation.
    pub fn indent_unit(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.tab_width)
        }
    }
}

/// Errors that can occur when loading or running a formatter.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Failed to parse {dialect} source: {message}")]
    Syntax { dialect: Dialect, message: String },

    #[error("Failed to print {dialect} source: {message}")]
    Print { dialect: Dialect, message: String },

    #[error("Failed to load formatter config {path}: {message}")]
    Config { path: String, message: String },
}

static SHARED: OnceCell<Formatter> = OnceCell::const_new();

/// Loaded formatter set sharing one configuration.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: FormatterConfig,
}

impl Formatter {
    /// Load formatters with the default configuration.
    ///
    /// Safe to call repeatedly; every call yields an equivalent formatter.
    pub async fn load() -> Result<Self, FormatError> {
        Ok(Self::with_config(FormatterConfig::default()))
    }

    /// Load formatters with the configuration stored in a `.prettierrc`-style
    /// JSON file. Missing keys fall back to defaults.
    pub async fn load_from(path: &Path) -> Result<Self, FormatError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| FormatError::Config {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let config: FormatterConfig =
            serde_json::from_str(&raw).map_err(|e| FormatError::Config {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!("Loaded formatter config from {}", path.display());

        Ok(Self::with_config(config))
    }

    /// Process-wide formatter, loaded once on first use.
    pub async fn shared() -> Result<&'static Self, FormatError> {
        SHARED.get_or_try_init(Self::load).await
    }

    /// Build a formatter from an explicit configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    /// Configuration shared by all four formatters.
    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Format markup.
    pub fn format_html(&self, source: &str) -> Result<String, FormatError> {
        html::format_html(source, &self.config)
    }

    /// Format a stylesheet.
    pub fn format_css(&self, source: &str) -> Result<String, FormatError> {
        style::format_css(source)
    }

    /// Format JavaScript (JSX allowed).
    pub fn format_js(&self, source: &str) -> Result<String, FormatError> {
        script::format_script(source, Dialect::JavaScript, &self.config)
    }

    /// Format plain TypeScript.
    pub fn format_ts(&self, source: &str) -> Result<String, FormatError> {
        script::format_script(source, Dialect::TypeScript, &self.config)
    }

    /// Format TypeScript with JSX.
    pub fn format_tsx(&self, source: &str) -> Result<String, FormatError> {
        script::format_script(source, Dialect::TypeScriptJsx, &self.config)
    }

    /// Format text of any supported dialect.
    pub fn format(&self, dialect: Dialect, source: &str) -> Result<String, FormatError> {
        match dialect {
            Dialect::Html => self.format_html(source),
            Dialect::Css => self.format_css(source),
            Dialect::JavaScript => self.format_js(source),
            Dialect::TypeScript => self.format_ts(source),
            Dialect::TypeScriptJsx => self.format_tsx(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn config_serializes_like_prettierrc() {
        let json = serde_json::to_value(FormatterConfig::default()).unwrap();

        assert_eq!(json["printWidth"], 80);
        assert_eq!(json["singleQuote"], true);
        assert_eq!(json["trailingComma"], "all");
        assert_eq!(json["useTabs"], false);
    }

    #[test]
    fn indent_unit_follows_config() {
        let mut config = FormatterConfig::default();
        assert_eq!(config.indent_unit(), "  ");

        config.use_tabs = true;
        assert_eq!(config.indent_unit(), "\t");
    }

    #[tokio::test]
    async fn repeated_loads_are_equivalent() {
        let first = Formatter::load().await.unwrap();
        let second = Formatter::load().await.unwrap();

        assert_eq!(first.config(), second.config());
        assert_eq!(
            first.format_css(".a{color:red}").unwrap(),
            second.format_css(".a{color:red}").unwrap()
        );
    }

    #[tokio::test]
    async fn shared_formatter_is_memoized() {
        let a = Formatter::shared().await.unwrap();
        let b = Formatter::shared().await.unwrap();

        assert!(std::ptr::eq(a, b));
    }

    #[tokio::test]
    async fn loads_partial_config_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(".prettierrc");
        std::fs::write(&path, r#"{ "useTabs": true }"#).unwrap();

        let formatter = Formatter::load_from(&path).await.unwrap();

        assert!(formatter.config().use_tabs);
        assert_eq!(formatter.config().print_width, 80);
    }

    #[tokio::test]
    async fn missing_config_file_is_an_error() {
        let result = Formatter::load_from(Path::new("/nonexistent/.prettierrc")).await;

        assert!(matches!(result, Err(FormatError::Config { .. })));
    }
}
