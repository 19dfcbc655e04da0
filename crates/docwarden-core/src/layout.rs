// ABOUTME: Describes where a docs repository keeps its pages and its report file.
// ABOUTME: Ties discovery, health analysis, and report writing together for the CLI commands.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::discover::{DiscoveryError, DocFile, discover_markdown};
use crate::git::CommitDates;
use crate::health::{
    HEALTH_REPORT_END_MARKER, HEALTH_REPORT_START_MARKER, HealthPolicy, HealthReport, analyze,
};
use crate::report::{ReportError, write_section};
use crate::versions::{
    VERSION_REPORT_END_MARKER, VERSION_REPORT_START_MARKER, VersionReport, collect_versions,
};

pub const DEFAULT_DOCS_DIRECTORY: &str = "docs";
pub const DEFAULT_REPORT_FILENAME: &str = "docs_health_report.md";

/// Errors from running a full report pass.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("report error: {0}")]
    Report(#[from] ReportError),
}

/// Filesystem layout of a docs repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsLayout {
    /// Repository root; git is queried from here.
    pub root: PathBuf,
    /// Docs directory, relative to `root`.
    pub docs_dir: PathBuf,
    /// Report file, relative to `root`.
    pub report_file: PathBuf,
}

impl DocsLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIRECTORY),
            report_file: PathBuf::from(DEFAULT_REPORT_FILENAME),
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join(&self.report_file)
    }

    pub fn docs_path(&self) -> PathBuf {
        self.root.join(&self.docs_dir)
    }

    pub fn pages(&self) -> Result<Vec<DocFile>, DiscoveryError> {
        discover_markdown(&self.root, &self.docs_dir)
    }

    /// Analyze page freshness and rewrite the health section of the report file.
    pub fn run_health<C: CommitDates + ?Sized>(
        &self,
        dates: &C,
        now: DateTime<FixedOffset>,
        policy: HealthPolicy,
    ) -> Result<HealthReport, LayoutError> {
        let pages = self.pages()?;
        let report = analyze(&pages, dates, now, policy);
        write_section(
            &self.report_path(),
            HEALTH_REPORT_START_MARKER,
            HEALTH_REPORT_END_MARKER,
            &report.render(),
        )?;
        tracing::info!(
            "health scan: {} pages, {} stale, {} recent, {} unknown",
            report.total_docs,
            report.total_stale,
            report.recently_updated,
            report.unknown
        );
        Ok(report)
    }

    /// Group pages by version and rewrite the version section of the report file.
    pub fn run_versions(&self) -> Result<VersionReport, LayoutError> {
        let pages = self.pages()?;
        let report = collect_versions(&pages);
        write_section(
            &self.report_path(),
            VERSION_REPORT_START_MARKER,
            VERSION_REPORT_END_MARKER,
            &report.render(),
        )?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use std::fs;
    use std::path::Path;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-10-19T00:00:00+00:00").unwrap()
    }

    #[test]
    fn health_and_version_sections_share_one_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("docs/tools")).unwrap();
        fs::write(root.join("docs/index.md"), "---\nversion: 1.1.0\n---\n# Home\n").unwrap();
        fs::write(root.join("docs/tools/old.md"), "# Old\n").unwrap();
        fs::write(root.join("docs_health_report.md"), "# Reports").unwrap();

        let layout = DocsLayout::new(root);
        let dates = |path: &Path| {
            if path == Path::new("docs/tools/old.md") {
                Some(now() - TimeDelta::days(200))
            } else {
                Some(now() - TimeDelta::days(1))
            }
        };

        let health = layout.run_health(&dates, now(), HealthPolicy::default()).unwrap();
        assert_eq!(health.exit_code(), 1);
        layout.run_versions().unwrap();
        // A second run replaces rather than duplicates.
        layout.run_health(&dates, now(), HealthPolicy::default()).unwrap();

        let report = fs::read_to_string(layout.report_path()).unwrap();
        assert!(report.starts_with("# Reports\n\n<!-- BEGIN_DOCS_HEALTH_REPORT -->"));
        assert_eq!(report.matches(HEALTH_REPORT_START_MARKER).count(), 1);
        assert_eq!(report.matches(VERSION_REPORT_START_MARKER).count(), 1);
        assert!(report.contains("- **docs/tools/old.md**: Last updated 200 days ago"));
        assert!(report.contains("## Version 1.1.0"));
    }
}
