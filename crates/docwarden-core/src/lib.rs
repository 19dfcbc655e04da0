// ABOUTME: Core library for docwarden: docs discovery, front matter, and report generation.
// ABOUTME: Provides the health and version reports plus the catalog card renderer used by the CLI.

pub mod catalog;
pub mod discover;
pub mod frontmatter;
pub mod git;
pub mod glob;
pub mod health;
pub mod layout;
pub mod report;
pub mod versions;

pub use catalog::{CatalogCard, CatalogError, CatalogOptions, collect_cards, render_catalog};
pub use discover::{DiscoveryError, DocFile, discover_markdown};
pub use frontmatter::{FrontMatter, FrontMatterError, parse_page};
pub use git::{CommitDates, GitLog};
pub use health::{HealthPolicy, HealthReport, PolicyError, analyze};
pub use layout::DocsLayout;
pub use report::{ReportError, write_section};
pub use versions::{VersionReport, collect_versions};
