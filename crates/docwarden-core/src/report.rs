// ABOUTME: Rewrites a marker-delimited section inside the shared docs report file.
// ABOUTME: Replaces the span between start and end markers, or appends the section when absent.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use regex::{NoExpand, Regex};
use thiserror::Error;

/// Errors that can occur while updating a report file.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Replace everything from `start_marker` through `end_marker` in `existing`
/// with `section`. The match is greedy, so stray markers in between are
/// swallowed. When the markers are not present the section is appended after
/// a blank line.
pub fn splice_section(
    existing: &str,
    start_marker: &str,
    end_marker: &str,
    section: &str,
) -> Result<String, ReportError> {
    let pattern = Regex::new(&format!(
        "(?s){}.*{}",
        regex::escape(start_marker),
        regex::escape(end_marker)
    ))?;

    if pattern.is_match(existing) {
        Ok(pattern.replace_all(existing, NoExpand(section)).into_owned())
    } else {
        Ok(format!("{}\n\n{}", existing, section))
    }
}

/// Splice `section` into the report file at `path`. A missing file is
/// treated as empty and created.
pub fn write_section(
    path: &Path,
    start_marker: &str,
    end_marker: &str,
    section: &str,
) -> Result<(), ReportError> {
    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    let updated = splice_section(&existing, start_marker, end_marker, section)?;
    fs::write(path, updated)?;
    tracing::info!("updated report section {} in {}", start_marker, path.display());
    Ok(())
}
