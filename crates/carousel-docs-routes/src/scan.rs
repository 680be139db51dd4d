//! Building the page query from a docs directory.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::flatten::{MdxAllRoutes, MdxNode};
use crate::frontmatter::extract_frontmatter;

/// Errors that can occur when scanning docs.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Docs directory not found: {0}")]
    MissingDir(PathBuf),

    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Invalid frontmatter in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },
}

/// Slug of a page at `relative` (e.g. `api/index.mdx` -> `/api/`).
pub fn page_slug(relative: &Path) -> String {
    let mut segments: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(|p| p.components())
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    let stem = relative
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("index");
    if stem != "index" {
        segments.push(stem.to_string());
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", segments.join("/"))
    }
}

/// Collect every `.md`/`.mdx` page with frontmatter under `docs_dir`.
///
/// Pages are visited in file name order. Pages without frontmatter are
/// skipped.
pub fn scan_docs(docs_dir: &Path) -> Result<MdxAllRoutes, ScanError> {
    if !docs_dir.is_dir() {
        return Err(ScanError::MissingDir(docs_dir.to_path_buf()));
    }

    let mut nodes = Vec::new();

    for entry in WalkDir::new(docs_dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "mdx" && ext != "md" {
            continue;
        }

        let content = fs::read_to_string(path).map_err(|e| ScanError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (frontmatter, _) =
            extract_frontmatter(&content).map_err(|e| ScanError::Frontmatter {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let Some(frontmatter) = frontmatter else {
            tracing::warn!("Skipping {} (no frontmatter)", path.display());
            continue;
        };

        let relative = path.strip_prefix(docs_dir).unwrap_or(path);
        let slug = match &frontmatter.slug {
            Some(slug) => slug.clone(),
            None => page_slug(relative),
        };
        let id = relative.to_string_lossy().replace('\\', "/");

        nodes.push(MdxNode::new(id, slug, frontmatter));
    }

    tracing::debug!("Found {} pages in {}", nodes.len(), docs_dir.display());

    Ok(MdxAllRoutes::from_nodes(nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn derives_slugs() {
        assert_eq!(page_slug(Path::new("index.mdx")), "/");
        assert_eq!(page_slug(Path::new("get-started.mdx")), "/get-started/");
        assert_eq!(page_slug(Path::new("api/index.mdx")), "/api/");
        assert_eq!(page_slug(Path::new("api/options.md")), "/api/options/");
    }

    #[test]
    fn scans_pages_with_frontmatter() {
        let temp = tempdir().unwrap();
        write(temp.path(), "index.mdx", "---\ntitle: Home\n---\n");
        write(temp.path(), "api/index.mdx", "---\ntitle: API\norder: 2\n---\n");
        write(temp.path(), "api/options.mdx", "---\ntitle: Options\n---\n");
        write(temp.path(), "notes.mdx", "# No frontmatter\n");
        write(temp.path(), "logo.svg", "<svg></svg>");

        let data = scan_docs(temp.path()).unwrap();
        let slugs: Vec<&str> = data
            .all_mdx
            .edges
            .iter()
            .map(|e| e.node.fields.slug.as_str())
            .collect();

        assert_eq!(slugs, vec!["/api/", "/api/options/", "/"]);
        assert_eq!(data.all_mdx.edges[0].node.id, "api/index.mdx");
        assert_eq!(data.all_mdx.edges[0].node.frontmatter.order, Some(2));
    }

    #[test]
    fn honors_slug_override() {
        let temp = tempdir().unwrap();
        write(temp.path(), "guide.mdx", "---\ntitle: Guide\nslug: /guides/intro/\n---\n");

        let data = scan_docs(temp.path()).unwrap();

        assert_eq!(data.all_mdx.edges[0].node.fields.slug, "/guides/intro/");
    }

    #[test]
    fn invalid_frontmatter_names_the_file() {
        let temp = tempdir().unwrap();
        write(temp.path(), "broken.mdx", "---\ntitle: [oops\n---\n");

        let result = scan_docs(temp.path());

        assert!(matches!(
            result,
            Err(ScanError::Frontmatter { path, .. }) if path.ends_with("broken.mdx")
        ));
    }

    #[test]
    fn missing_dir_fails() {
        let temp = tempdir().unwrap();

        assert!(matches!(
            scan_docs(&temp.path().join("docs")),
            Err(ScanError::MissingDir(_))
        ));
    }
}
