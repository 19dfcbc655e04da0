// ABOUTME: Groups documentation pages by the `version` key of their front matter.
// ABOUTME: Renders the version report section, listing unversioned pages separately.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::fs;

use crate::discover::DocFile;
use crate::frontmatter::parse_page;

pub const VERSION_REPORT_START_MARKER: &str = "<!-- BEGIN_VERSION_REPORT -->";
pub const VERSION_REPORT_END_MARKER: &str = "<!-- END_VERSION_REPORT -->";

/// A page listed in the version report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedPage {
    pub display_path: String,
    /// Site-relative link to the rendered page, e.g. `tools/index.html`.
    pub link: String,
}

impl VersionedPage {
    fn from_doc(doc: &DocFile) -> Self {
        let link = match doc.relative_path.strip_suffix(".md") {
            Some(stem) => format!("{}.html", stem),
            None => doc.relative_path.clone(),
        };
        Self {
            display_path: doc.display_path.clone(),
            link,
        }
    }
}

/// Pages grouped by declared version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionReport {
    pub by_version: BTreeMap<String, Vec<VersionedPage>>,
    pub unversioned: Vec<VersionedPage>,
}

/// Read each page and bucket it by its front matter `version`.
///
/// Unreadable pages are logged and left out of the report. Pages with broken
/// front matter are reported as unversioned.
pub fn collect_versions(docs: &[DocFile]) -> VersionReport {
    let mut report = VersionReport::default();

    for doc in docs {
        let content = match fs::read_to_string(&doc.path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("skipping unreadable page {}: {}", doc.display_path, e);
                continue;
            }
        };

        let version = match parse_page(&content) {
            Ok(page) => page.front_matter.get_literal("version"),
            Err(e) => {
                tracing::warn!("bad front matter in {}: {}", doc.display_path, e);
                None
            }
        };

        let page = VersionedPage::from_doc(doc);
        match version {
            Some(v) => report.by_version.entry(v.trim().to_string()).or_default().push(page),
            None => report.unversioned.push(page),
        }
    }

    report
}

impl VersionReport {
    /// Render the report section, markers included.
    pub fn render(&self) -> String {
        let mut out = String::new();

        writeln!(out, "{}", VERSION_REPORT_START_MARKER).unwrap();
        writeln!(out, "# Documentation Version Report").unwrap();
        writeln!(out).unwrap();
        writeln!(
            out,
            "This report provides a summary of the versions of the documentation pages."
        )
        .unwrap();
        writeln!(out).unwrap();

        for (version, pages) in &self.by_version {
            writeln!(out, "## Version {}", version).unwrap();
            writeln!(out).unwrap();
            writeln!(out, "Found {} pages with this version:", pages.len()).unwrap();
            writeln!(out).unwrap();
            write_links(&mut out, pages);
            writeln!(out).unwrap();
        }

        if !self.unversioned.is_empty() {
            writeln!(out, "## Pages without Version Information").unwrap();
            writeln!(out).unwrap();
            writeln!(
                out,
                "Found {} pages without version metadata:",
                self.unversioned.len()
            )
            .unwrap();
            writeln!(out).unwrap();
            write_links(&mut out, &self.unversioned);
            writeln!(out).unwrap();
        }

        out.push_str(VERSION_REPORT_END_MARKER);
        out
    }
}

fn write_links(out: &mut String, pages: &[VersionedPage]) {
    for page in pages {
        writeln!(out, "- [{}]({})", page.display_path, page.link).unwrap();
    }
}
