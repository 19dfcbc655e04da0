// ABOUTME: Walks a documentation directory and collects every markdown page in it.
// ABOUTME: Each page records its display path, docs-relative path, and owning section.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// Section name used for pages that sit directly in the docs directory.
pub const ROOT_SECTION: &str = "Root";

/// Errors that can occur while walking the docs tree.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A markdown page found under the docs directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocFile {
    /// Filesystem path used to read the page and query its history.
    pub path: PathBuf,
    /// Path relative to the repository root with `/` separators, e.g. `docs/tools/index.md`.
    pub display_path: String,
    /// Path relative to the docs directory with `/` separators, e.g. `tools/index.md`.
    pub relative_path: String,
    /// Name of the page's parent directory, or [`ROOT_SECTION`].
    pub section: String,
}

/// Join path components with `/` regardless of platform.
pub(crate) fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Find all `*.md` files under `root/docs_dir`, in sorted walk order.
///
/// A missing docs directory is logged and yields no pages.
pub fn discover_markdown(root: &Path, docs_dir: &Path) -> Result<Vec<DocFile>, DiscoveryError> {
    let base = root.join(docs_dir);
    if !base.is_dir() {
        tracing::warn!("docs directory {} does not exist; nothing to scan", base.display());
        return Ok(Vec::new());
    }

    let mut pages = Vec::new();
    for entry in WalkDir::new(&base).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }

        let section = match path.parent() {
            Some(parent) if parent != base => parent
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| ROOT_SECTION.to_string()),
            _ => ROOT_SECTION.to_string(),
        };

        let relative = path.strip_prefix(&base).unwrap_or(path);
        let display = path.strip_prefix(root).unwrap_or(path);

        pages.push(DocFile {
            path: path.to_path_buf(),
            display_path: slash_path(display),
            relative_path: slash_path(relative),
            section,
        });
    }

    tracing::debug!("discovered {} markdown pages under {}", pages.len(), base.display());
    Ok(pages)
}
