//! Shareable sandbox parameters for the CodeSandbox define API.
//!
//! The encoding matches `getParameters` from the `codesandbox` package: the
//! `{"files": …}` JSON is compressed with LZ-string to base64, then made URL
//! safe by mapping `+` to `-` and `/` to `_` and dropping `=` padding.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::{SandboxError, SandboxFileMap};

/// Endpoint that creates a sandbox from define parameters.
pub const DEFINE_ENDPOINT: &str = "https://codesandbox.io/api/v1/sandboxes/define";

#[derive(Serialize)]
struct DefineParameters<'a> {
    files: &'a SandboxFileMap,
}

#[derive(Deserialize)]
struct OwnedDefineParameters {
    files: SandboxFileMap,
}

/// Encode a file map into define parameters.
pub fn encode(files: &SandboxFileMap) -> Result<String, SandboxError> {
    let json = serde_json::to_string(&DefineParameters { files }).map_err(|e| {
        SandboxError::Serialize {
            what: "sandbox parameters".to_string(),
            message: e.to_string(),
        }
    })?;

    let compressed = lz_str::compress_to_base64(json.as_str());

    Ok(compressed
        .replace('+', "-")
        .replace('/', "_")
        .trim_end_matches('=')
        .to_string())
}

/// Decode define parameters back into a file map.
pub fn decode(parameters: &str) -> Result<SandboxFileMap, SandboxError> {
    let mut base64 = parameters.replace('-', "+").replace('_', "/");
    while base64.len() % 4 != 0 {
        base64.push('=');
    }

    let utf16 = lz_str::decompress_from_base64(base64.as_str())
        .ok_or_else(|| SandboxError::Decode("invalid LZ-string payload".to_string()))?;
    let json = String::from_utf16(&utf16).map_err(|e| SandboxError::Decode(e.to_string()))?;

    let parsed: OwnedDefineParameters =
        serde_json::from_str(&json).map_err(|e| SandboxError::Decode(e.to_string()))?;

    Ok(parsed.files)
}

/// URL that opens a new sandbox from define parameters.
pub fn define_url(parameters: &str) -> Result<String, SandboxError> {
    let url = Url::parse_with_params(DEFINE_ENDPOINT, [("parameters", parameters)])?;
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SandboxFileEntry, SandboxPath};
    use pretty_assertions::assert_eq;

    fn sample() -> SandboxFileMap {
        let mut files = SandboxFileMap::new();
        files.insert(
            SandboxPath::root("package.json"),
            SandboxFileEntry::text("{\n\t\"name\": \"demo-vanilla\"\n}"),
        );
        files.insert(
            SandboxPath::parse("src/images/slide-1.jpg").unwrap(),
            SandboxFileEntry::binary("https://example.com/slide-1.jpg"),
        );
        files
    }

    #[test]
    fn output_is_url_safe() {
        let parameters = encode(&sample()).unwrap();

        assert!(!parameters.is_empty());
        assert!(!parameters.contains('+'));
        assert!(!parameters.contains('/'));
        assert!(!parameters.ends_with('='));
    }

    #[test]
    fn matches_reference_compression() {
        let files = sample();
        let json = serde_json::to_string(&DefineParameters { files: &files }).unwrap();
        let reference = lz_str::compress_to_base64(json.as_str())
            .replace('+', "-")
            .replace('/', "_");

        assert_eq!(encode(&files).unwrap(), reference.trim_end_matches('='));
    }

    #[test]
    fn serializes_files_in_service_shape() {
        let files = sample();
        let json = serde_json::to_string(&DefineParameters { files: &files }).unwrap();

        assert!(json.starts_with(r#"{"files":{"package.json":{"isBinary":false,"content":"#));
        assert!(json.contains(r#""src/images/slide-1.jpg":{"isBinary":true"#));
    }

    #[test]
    fn decodes_what_it_encodes() {
        let files = sample();

        assert_eq!(decode(&encode(&files).unwrap()).unwrap(), files);
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode("!!!").is_err());
    }

    #[test]
    fn rejects_paths_outside_sandbox_folders() {
        let mut files = SandboxFileMap::new();
        files.insert(SandboxPath::root("lib/evil.js"), SandboxFileEntry::text(""));

        assert!(matches!(
            decode(&encode(&files).unwrap()),
            Err(SandboxError::Decode(_))
        ));
    }

    #[test]
    fn builds_define_url() {
        let parameters = encode(&sample()).unwrap();

        assert_eq!(
            define_url("abc").unwrap(),
            "https://codesandbox.io/api/v1/sandboxes/define?parameters=abc"
        );
        assert_eq!(
            define_url(&parameters).unwrap(),
            format!("{DEFINE_ENDPOINT}?parameters={parameters}")
        );
    }
}
