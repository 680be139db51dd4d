//! Core sandbox types: dialects, flavors, typed paths and file maps.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use carousel_docs_format::{Dialect, FormatError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::content::ContentError;

/// Script dialect of a generated sandbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    JavaScript,
    TypeScript,
}

impl Language {
    /// Whether this is the statically typed dialect.
    pub fn is_typescript(&self) -> bool {
        matches!(self, Self::TypeScript)
    }

    /// Script extension used by the vanilla flavor.
    pub fn vanilla_extension(&self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::TypeScript => "ts",
        }
    }

    /// Script extension used by the React flavor.
    pub fn react_extension(&self) -> &'static str {
        match self {
            Self::JavaScript => "jsx",
            Self::TypeScript => "tsx",
        }
    }

    /// Formatter dialect for scripts of `flavor` written in this language.
    ///
    /// React TypeScript files are `.tsx`; vanilla ones are plain `.ts`.
    pub fn dialect(&self, flavor: Flavor) -> Dialect {
        match (self, flavor) {
            (Self::JavaScript, _) => Dialect::JavaScript,
            (Self::TypeScript, Flavor::Vanilla) => Dialect::TypeScript,
            (Self::TypeScript, Flavor::React) => Dialect::TypeScriptJsx,
        }
    }
}

impl FromStr for Language {
    type Err = SandboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" => Ok(Self::JavaScript),
            "typescript" | "ts" => Ok(Self::TypeScript),
            _ => Err(SandboxError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JavaScript => f.write_str("javascript"),
            Self::TypeScript => f.write_str("typescript"),
        }
    }
}

/// Target project shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    Vanilla,
    React,
}

impl Flavor {
    /// Suffix appended to the example id to form the sandbox title.
    pub fn title(&self, id: &str) -> String {
        match self {
            Self::Vanilla => format!("{id}-vanilla"),
            Self::React => format!("{id}-react"),
        }
    }
}

impl FromStr for Flavor {
    type Err = SandboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vanilla" => Ok(Self::Vanilla),
            "react" => Ok(Self::React),
            _ => Err(SandboxError::UnsupportedFlavor(s.to_string())),
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vanilla => f.write_str("vanilla"),
            Self::React => f.write_str("react"),
        }
    }
}

/// Folder roles inside a generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SandboxFolder {
    Css,
    Js,
    Images,
    Public,
}

impl SandboxFolder {
    /// All folder roles.
    pub const ALL: [SandboxFolder; 4] = [Self::Css, Self::Js, Self::Images, Self::Public];

    /// Relative folder path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Css => "src/css",
            Self::Js => "src/js",
            Self::Images => "src/images",
            Self::Public => "public",
        }
    }

    /// Path of a file inside this folder.
    pub fn file(&self, name: &str) -> SandboxPath {
        SandboxPath(format!("{}/{}", self.as_str(), name))
    }
}

/// A relative path inside a generated project: a root file, or a file under
/// one of the [`SandboxFolder`] roles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SandboxPath(String);

impl SandboxPath {
    /// A file at the project root.
    pub fn root(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Validate an arbitrary relative path (caller overrides, decoded maps).
    pub fn parse(path: &str) -> Result<Self, SandboxError> {
        let malformed = path.is_empty()
            || path.starts_with('/')
            || path.contains('\\')
            || path.split('/').any(|s| s.is_empty() || s == "." || s == "..");

        let candidate = Self(path.to_string());
        let placed = !path.contains('/') || candidate.folder().is_some();

        if malformed || !placed {
            return Err(SandboxError::InvalidPath(path.to_string()));
        }

        Ok(candidate)
    }

    /// The path as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Folder role this path lives in, if any.
    pub fn folder(&self) -> Option<SandboxFolder> {
        SandboxFolder::ALL.into_iter().find(|folder| {
            self.0
                .strip_prefix(folder.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
        })
    }

}

impl TryFrom<String> for SandboxPath {
    type Error = SandboxError;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        Self::parse(&path)
    }
}

impl From<SandboxPath> for String {
    fn from(path: SandboxPath) -> Self {
        path.0
    }
}

impl fmt::Display for SandboxPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One file of a generated project.
///
/// Binary entries carry the URL the hosting service fetches the asset from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxFileEntry {
    #[serde(rename = "isBinary")]
    pub is_binary: bool,
    pub content: String,
}

impl SandboxFileEntry {
    /// A text file.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            is_binary: false,
            content: content.into(),
        }
    }

    /// A binary file fetched from `url`.
    pub fn binary(url: impl Into<String>) -> Self {
        Self {
            is_binary: true,
            content: url.into(),
        }
    }
}

/// Relative path to file entry for one generated project.
pub type SandboxFileMap = BTreeMap<SandboxPath, SandboxFileEntry>;

/// Generated project files before images and overrides are merged.
///
/// The typed variant always carries the TypeScript config and declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum SandboxFiles {
    Untyped {
        base: SandboxFileMap,
    },
    Typed {
        base: SandboxFileMap,
        ts_config: SandboxFileEntry,
        declarations: SandboxFileEntry,
    },
}

impl SandboxFiles {
    pub const TS_CONFIG: &'static str = "tsconfig.json";
    pub const DECLARATIONS: &'static str = "declarations.d.ts";

    /// Flatten into a file map.
    pub fn into_file_map(self) -> SandboxFileMap {
        match self {
            Self::Untyped { base } => base,
            Self::Typed {
                mut base,
                ts_config,
                declarations,
            } => {
                base.insert(SandboxPath::root(Self::TS_CONFIG), ts_config);
                base.insert(SandboxPath::root(Self::DECLARATIONS), declarations);
                base
            }
        }
    }
}

/// Input for one sandbox generation call.
#[derive(Debug, Clone, Default)]
pub struct SandboxCreateConfig {
    /// Example identifier, used for the project title
    pub id: String,

    /// Carousel script source in the chosen language
    pub carousel_script: String,

    /// Rendered carousel markup (vanilla flavor only)
    pub carousel_html: String,

    /// Carousel options injected as `OPTIONS`
    pub options: Map<String, Value>,

    /// Example stylesheet
    pub styles: String,

    /// Slide indices (React flavor renders `SLIDE_COUNT` from this)
    pub slides: Vec<u32>,

    /// Extra npm packages the example needs
    pub plugins: Vec<String>,

    /// Files merged last, replacing generated entries
    pub sandbox_overrides: SandboxFileMap,

    /// Script dialect
    pub language: Language,
}

/// Errors that can occur while generating a sandbox.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    #[error("Unsupported language: {0} (expected javascript or typescript)")]
    UnsupportedLanguage(String),

    #[error("Unsupported flavor: {0} (expected vanilla or react)")]
    UnsupportedFlavor(String),

    #[error("Unknown sandbox: {0}")]
    UnknownSandbox(String),

    #[error("Invalid sandbox path: {0}")]
    InvalidPath(String),

    #[error("Unknown example: {0}")]
    UnknownExample(String),

    #[error("Example {example} has no {kind} source")]
    MissingSource { example: String, kind: String },

    #[error("Invalid carousel script: {0}")]
    InvalidScript(String),

    #[error("Failed to render template {name}: {message}")]
    Template { name: String, message: String },

    #[error("Failed to serialize {what}: {message}")]
    Serialize { what: String, message: String },

    #[error("Failed to decode sandbox parameters: {0}")]
    Decode(String),

    #[error("Failed to open {url}: {message}")]
    Open { url: String, message: String },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("Invalid sandbox URL: {0}")]
    Url(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_language() {
        assert_eq!("javascript".parse::<Language>().unwrap(), Language::JavaScript);
        assert_eq!("TS".parse::<Language>().unwrap(), Language::TypeScript);
        assert!(matches!(
            "coffeescript".parse::<Language>(),
            Err(SandboxError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn language_defaults_to_javascript() {
        assert_eq!(Language::default(), Language::JavaScript);
        assert_eq!(SandboxCreateConfig::default().language, Language::JavaScript);
    }

    #[test]
    fn extensions_follow_language() {
        assert_eq!(Language::JavaScript.vanilla_extension(), "js");
        assert_eq!(Language::TypeScript.vanilla_extension(), "ts");
        assert_eq!(Language::JavaScript.react_extension(), "jsx");
        assert_eq!(Language::TypeScript.react_extension(), "tsx");
    }

    #[test]
    fn folder_paths() {
        assert_eq!(SandboxFolder::Css.file("base.css").as_str(), "src/css/base.css");
        assert_eq!(
            SandboxFolder::Js.file("index.ts").folder(),
            Some(SandboxFolder::Js)
        );
        assert_eq!(SandboxPath::root("package.json").folder(), None);
        assert_eq!(SandboxPath::root("src/jsx/a.js").folder(), None);
    }

    #[test]
    fn validates_override_paths() {
        assert!(SandboxPath::parse("src/js/infinite-scroll.js").is_ok());
        assert!(SandboxPath::parse("/etc/passwd").is_err());
        assert!(SandboxPath::parse("src/../secret").is_err());
        assert!(SandboxPath::parse("src//a.js").is_err());
        assert!(SandboxPath::parse("").is_err());
    }

    #[test]
    fn paths_must_sit_in_a_known_folder() {
        assert!(SandboxPath::parse("package.json").is_ok());
        assert!(SandboxPath::parse("public/index.html").is_ok());
        assert!(SandboxPath::parse("src/images/slide-1.jpg").is_ok());
        assert!(matches!(
            SandboxPath::parse("foo/bar.js"),
            Err(SandboxError::InvalidPath(_))
        ));
        assert!(SandboxPath::parse("src/js").is_err());
    }

    #[test]
    fn deserializing_validates_paths() {
        let ok: SandboxFileMap =
            serde_json::from_str(r#"{"src/js/index.js":{"isBinary":false,"content":""}}"#).unwrap();
        let bad = serde_json::from_str::<SandboxFileMap>(
            r#"{"foo/bar.js":{"isBinary":false,"content":""}}"#,
        );

        assert!(ok.contains_key(&SandboxFolder::Js.file("index.js")));
        assert!(bad.is_err());
    }

    #[test]
    fn script_dialect_follows_flavor() {
        assert_eq!(Language::JavaScript.dialect(Flavor::React), Dialect::JavaScript);
        assert_eq!(Language::TypeScript.dialect(Flavor::Vanilla), Dialect::TypeScript);
        assert_eq!(Language::TypeScript.dialect(Flavor::React), Dialect::TypeScriptJsx);
    }

    #[test]
    fn file_entry_serializes_with_camel_case_flag() {
        let json = serde_json::to_string(&SandboxFileEntry::text("a")).unwrap();

        assert_eq!(json, r#"{"isBinary":false,"content":"a"}"#);
    }

    #[test]
    fn typed_files_add_two_entries() {
        let mut base = SandboxFileMap::new();
        base.insert(SandboxPath::root("package.json"), SandboxFileEntry::text("{}"));

        let untyped = SandboxFiles::Untyped { base: base.clone() }.into_file_map();
        let typed = SandboxFiles::Typed {
            base,
            ts_config: SandboxFileEntry::text("{}"),
            declarations: SandboxFileEntry::text("declare module '*.css';"),
        }
        .into_file_map();

        assert_eq!(untyped.len(), 1);
        assert_eq!(typed.len(), 3);
        assert!(typed.contains_key(&SandboxPath::root("tsconfig.json")));
        assert!(typed.contains_key(&SandboxPath::root("declarations.d.ts")));
    }
}
