// ABOUTME: Looks up the last commit timestamp of a file from source control.
// ABOUTME: Shells out to `git log` and treats any failure as an unknown date.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, FixedOffset};

/// Format produced by `git log --format=%ci`.
const GIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Source of last-commit timestamps for documentation files.
pub trait CommitDates {
    /// Return the time of the most recent commit touching `path`, or `None`
    /// when it cannot be determined.
    fn last_commit(&self, path: &Path) -> Option<DateTime<FixedOffset>>;
}

impl<F> CommitDates for F
where
    F: Fn(&Path) -> Option<DateTime<FixedOffset>>,
{
    fn last_commit(&self, path: &Path) -> Option<DateTime<FixedOffset>> {
        self(path)
    }
}

/// Queries `git log` from inside a repository checkout.
#[derive(Debug, Clone)]
pub struct GitLog {
    repo_root: PathBuf,
}

impl GitLog {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }
}

impl CommitDates for GitLog {
    fn last_commit(&self, path: &Path) -> Option<DateTime<FixedOffset>> {
        let output = Command::new("git")
            .args(["log", "-1", "--format=%ci", "--"])
            .arg(path)
            .current_dir(&self.repo_root)
            .output();

        let output = match output {
            Ok(o) => o,
            Err(e) => {
                tracing::warn!("failed to run git for {}: {}", path.display(), e);
                return None;
            }
        };
        if !output.status.success() {
            tracing::debug!("git log exited with {} for {}", output.status, path.display());
            return None;
        }

        parse_commit_date(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse a `%ci` timestamp such as `2025-06-01 14:03:22 +0200`.
/// Empty output (an untracked file) parses to `None`.
pub fn parse_commit_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_str(raw, GIT_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_git_iso_like_dates() {
        let date = parse_commit_date("2025-06-01 14:03:22 +0200\n").unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.hour(), 14);
        assert_eq!(date.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn empty_or_garbage_output_is_unknown() {
        assert!(parse_commit_date("").is_none());
        assert!(parse_commit_date("   \n").is_none());
        assert!(parse_commit_date("fatal: not a git repository").is_none());
    }

    #[test]
    fn closures_act_as_date_sources() {
        let fixed = parse_commit_date("2024-01-01 00:00:00 +0000");
        let source = |_: &Path| fixed;
        assert_eq!(source.last_commit(Path::new("docs/a.md")), fixed);
    }
}
