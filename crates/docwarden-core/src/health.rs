// ABOUTME: Classifies documentation pages as stale or recently updated from their last commit date.
// ABOUTME: Aggregates per-section statistics and renders the docs health report section.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::fs::OpenOptions;
use std::io::Write as IoWrite;
use std::path::Path;

use chrono::{DateTime, FixedOffset, TimeDelta};
use thiserror::Error;

use crate::discover::DocFile;
use crate::git::CommitDates;

pub const HEALTH_REPORT_START_MARKER: &str = "<!-- BEGIN_DOCS_HEALTH_REPORT -->";
pub const HEALTH_REPORT_END_MARKER: &str = "<!-- END_DOCS_HEALTH_REPORT -->";

pub const DEFAULT_STALE_AFTER_DAYS: i64 = 90;
pub const DEFAULT_RECENT_WITHIN_WEEKS: i64 = 4;

/// Largest accepted staleness window: one hundred years.
pub const MAX_STALE_AFTER_DAYS: i64 = 36_500;
pub const MAX_RECENT_WITHIN_WEEKS: i64 = 5_200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("stale threshold must be between 1 and {MAX_STALE_AFTER_DAYS} days, got {0}")]
    StaleDays(i64),

    #[error("recent window must be between 1 and {MAX_RECENT_WITHIN_WEEKS} weeks, got {0}")]
    RecentWeeks(i64),
}

/// Age thresholds used to classify pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthPolicy {
    pub stale_after_days: i64,
    pub recent_within_weeks: i64,
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self {
            stale_after_days: DEFAULT_STALE_AFTER_DAYS,
            recent_within_weeks: DEFAULT_RECENT_WITHIN_WEEKS,
        }
    }
}

impl HealthPolicy {
    pub fn new(stale_after_days: i64, recent_within_weeks: i64) -> Result<Self, PolicyError> {
        if !(1..=MAX_STALE_AFTER_DAYS).contains(&stale_after_days) {
            return Err(PolicyError::StaleDays(stale_after_days));
        }
        if !(1..=MAX_RECENT_WITHIN_WEEKS).contains(&recent_within_weeks) {
            return Err(PolicyError::RecentWeeks(recent_within_weeks));
        }
        Ok(Self {
            stale_after_days,
            recent_within_weeks,
        })
    }

    /// A page is stale when its last commit is strictly older than the
    /// staleness threshold. A page exactly at the threshold is not stale.
    /// A cutoff before the earliest representable date marks nothing stale.
    pub fn is_stale(&self, last_commit: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> bool {
        TimeDelta::try_days(self.stale_after_days)
            .and_then(|window| now.checked_sub_signed(window))
            .is_some_and(|cutoff| last_commit < cutoff)
    }

    /// A page is recent when its last commit is strictly newer than the
    /// recent-update threshold. A cutoff out of range marks everything recent.
    pub fn is_recent(&self, last_commit: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> bool {
        TimeDelta::try_weeks(self.recent_within_weeks)
            .and_then(|window| now.checked_sub_signed(window))
            .is_none_or(|cutoff| last_commit > cutoff)
    }
}

/// A stale page and how long ago it was last touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleEntry {
    pub display_path: String,
    pub days_since_update: i64,
}

/// Counts for one docs section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionStats {
    pub total_files: usize,
    pub stale_files: Vec<StaleEntry>,
}

/// Result of a health scan over all documentation pages.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub policy: HealthPolicy,
    pub sections: BTreeMap<String, SectionStats>,
    pub total_docs: usize,
    pub recently_updated: usize,
    pub total_stale: usize,
    /// Pages whose commit date could not be determined.
    pub unknown: usize,
}

/// Scan `docs` and classify each page by its last commit date.
///
/// Dates are looked up by each page's `display_path`, i.e. relative to the
/// repository root. Pages with an unknown date count toward totals but are
/// neither stale nor recent.
pub fn analyze<C: CommitDates + ?Sized>(
    docs: &[DocFile],
    dates: &C,
    now: DateTime<FixedOffset>,
    policy: HealthPolicy,
) -> HealthReport {
    let mut report = HealthReport {
        policy,
        sections: BTreeMap::new(),
        total_docs: 0,
        recently_updated: 0,
        total_stale: 0,
        unknown: 0,
    };

    for doc in docs {
        report.total_docs += 1;
        let stats = report.sections.entry(doc.section.clone()).or_default();
        stats.total_files += 1;

        let Some(last_commit) = dates.last_commit(Path::new(&doc.display_path)) else {
            tracing::debug!("no commit date for {}; skipping classification", doc.display_path);
            report.unknown += 1;
            continue;
        };

        if policy.is_stale(last_commit, now) {
            stats.stale_files.push(StaleEntry {
                display_path: doc.display_path.clone(),
                days_since_update: (now - last_commit).num_days(),
            });
            report.total_stale += 1;
        }

        if policy.is_recent(last_commit, now) {
            report.recently_updated += 1;
        }
    }

    report
}

impl HealthReport {
    /// Percentage of pages updated within the recent window; 0 with no pages.
    pub fn recent_percentage(&self) -> f64 {
        if self.total_docs == 0 {
            return 0.0;
        }
        self.recently_updated as f64 / self.total_docs as f64 * 100.0
    }

    /// Process exit status: 0 when nothing is stale, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.total_stale == 0 { 0 } else { 1 }
    }

    /// Render the report section, markers included.
    pub fn render(&self) -> String {
        let mut out = String::new();

        writeln!(out, "{}", HEALTH_REPORT_START_MARKER).unwrap();
        writeln!(out, "# Documentation Health Report").unwrap();
        writeln!(out).unwrap();
        write!(
            out,
            "**Summary:** **{:.1}%** of documentation pages were updated in the last {} weeks. ",
            self.recent_percentage(),
            self.policy.recent_within_weeks
        )
        .unwrap();
        writeln!(
            out,
            "A total of **{}** page(s) are considered stale (older than {} days).",
            self.total_stale, self.policy.stale_after_days
        )
        .unwrap();
        writeln!(out).unwrap();

        if self.total_stale == 0 {
            writeln!(out, "**All documentation is up-to-date!**").unwrap();
        } else {
            writeln!(out, "## Detailed Health by Section").unwrap();
            writeln!(out).unwrap();
            for (section, stats) in &self.sections {
                let stale_count = stats.stale_files.len();
                if stale_count == 0 {
                    writeln!(out, "### {} - ✅ Healthy", section).unwrap();
                    writeln!(
                        out,
                        "All {} page(s) in this section are up-to-date.",
                        stats.total_files
                    )
                    .unwrap();
                    writeln!(out).unwrap();
                } else {
                    writeln!(out, "### {} - ⚠️ Needs Review", section).unwrap();
                    writeln!(
                        out,
                        "{} of {} page(s) in this section are stale:",
                        stale_count, stats.total_files
                    )
                    .unwrap();
                    writeln!(out).unwrap();
                    for entry in &stats.stale_files {
                        writeln!(
                            out,
                            "- **{}**: Last updated {} days ago",
                            entry.display_path, entry.days_since_update
                        )
                        .unwrap();
                    }
                    writeln!(out).unwrap();
                }
            }
        }

        out.push_str(HEALTH_REPORT_END_MARKER);
        out
    }

    /// Key/value lines for a CI step output file.
    pub fn ci_output_lines(&self) -> String {
        format!(
            "recent_percentage={:.1}\nexit_code={}\n",
            self.recent_percentage(),
            self.exit_code()
        )
    }
}

/// Append the report's CI outputs to `path` (e.g. the file named by `GITHUB_OUTPUT`).
pub fn append_ci_outputs(path: &Path, report: &HealthReport) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(report.ci_output_lines().as_bytes())
}
