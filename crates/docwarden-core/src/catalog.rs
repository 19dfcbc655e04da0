// ABOUTME: Builds catalog cards from markdown pages and renders them as an HTML card grid.
// ABOUTME: Card metadata comes from front matter, then the first H1, then the file name.

use std::fs;
use std::path::{Path, PathBuf};

use askama::Template;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::Serialize;
use thiserror::Error;
use walkdir::WalkDir;

use crate::discover::slash_path;
use crate::frontmatter::{FrontMatterError, parse_page};
use crate::glob::GlobPattern;

/// Site path prefix the docs are published under.
pub const DEFAULT_SITE_PREFIX: &str = "/adk-docs";

/// Icon used when a page declares none, relative to the site prefix.
const DEFAULT_ICON: &str = "integrations/assets/toolbox.svg";

const TITLE_KEYS: &[&str] = &["catalog_title", "title"];
const DESCRIPTION_KEYS: &[&str] = &["catalog_description", "description"];
const ICON_KEYS: &[&str] = &["catalog_icon", "tool_icon", "icon"];

/// Errors that abort catalog rendering as a whole. Problems with a single
/// page are logged and the page is skipped instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// One card in the catalog grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogCard {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub link: String,
}

#[derive(Template)]
#[template(path = "catalog.html")]
struct CatalogGrid<'a> {
    cards: &'a [CatalogCard],
}

/// Where the docs live and how links to them are formed.
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub docs_dir: PathBuf,
    pub site_prefix: String,
}

impl CatalogOptions {
    pub fn new(docs_dir: impl Into<PathBuf>) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            site_prefix: DEFAULT_SITE_PREFIX.to_string(),
        }
    }

    pub fn with_site_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.site_prefix = prefix.into();
        self
    }

    fn prefix(&self) -> &str {
        self.site_prefix.trim_end_matches('/')
    }
}

/// Build a card for the page at `relative_path` (docs-relative, `/`-separated).
pub fn card_from_markdown(
    relative_path: &str,
    content: &str,
    site_prefix: &str,
) -> Result<CatalogCard, FrontMatterError> {
    let prefix = site_prefix.trim_end_matches('/');
    let page = parse_page(content)?;
    let fm = &page.front_matter;
    if fm.is_empty() {
        tracing::debug!("{} has no front matter fields, using fallbacks", relative_path);
    }

    let title = fm
        .get_text(TITLE_KEYS)
        .or_else(|| first_h1(page.body))
        .unwrap_or_else(|| title_from_file_name(relative_path));

    let description = fm.get_text(DESCRIPTION_KEYS).unwrap_or_default();

    let icon = match fm.get_text(ICON_KEYS) {
        Some(icon) if icon.starts_with('/') || icon.starts_with("http") => icon,
        Some(icon) => format!("{}/{}", prefix, icon),
        None => format!("{}/{}", prefix, DEFAULT_ICON),
    };

    let without_ext = slash_path(&Path::new(relative_path).with_extension(""));
    let link = format!("{}/{}/", prefix, without_ext);

    Ok(CatalogCard {
        title,
        description,
        icon,
        link,
    })
}

/// Collect cards for every page under the docs directory matching `pattern`,
/// sorted by path. `index.md` pages are container pages and are skipped.
pub fn collect_cards(options: &CatalogOptions, pattern: &str) -> Result<Vec<CatalogCard>, CatalogError> {
    let glob = GlobPattern::new(pattern)?;
    if !options.docs_dir.is_dir() {
        tracing::warn!("docs directory {} does not exist", options.docs_dir.display());
        return Ok(Vec::new());
    }

    let mut matches: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(&options.docs_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || entry.file_name() == "index.md" {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(&options.docs_dir)
            .unwrap_or(entry.path())
            .to_path_buf();
        if glob.matches(&slash_path(&relative)) {
            matches.push(relative);
        }
    }
    matches.sort();

    let mut cards = Vec::with_capacity(matches.len());
    for relative in matches {
        let path = options.docs_dir.join(&relative);
        let rel = slash_path(&relative);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Error processing {}: {}", path.display(), e);
                continue;
            }
        };
        match card_from_markdown(&rel, &content, options.prefix()) {
            Ok(card) => cards.push(card),
            Err(e) => tracing::warn!("Error processing {}: {}", path.display(), e),
        }
    }

    tracing::debug!("catalog pattern {} matched {} pages", glob.as_str(), cards.len());
    Ok(cards)
}

/// Render a card grid for the given cards.
pub fn render_cards(cards: &[CatalogCard]) -> Result<String, CatalogError> {
    Ok(CatalogGrid { cards }.render()?)
}

/// Collect and render the catalog for `pattern` in one step.
pub fn render_catalog(options: &CatalogOptions, pattern: &str) -> Result<String, CatalogError> {
    let cards = collect_cards(options, pattern)?;
    render_cards(&cards)
}

/// Text of the first level-1 heading in a markdown body.
fn first_h1(body: &str) -> Option<String> {
    let mut in_h1 = false;
    let mut text = String::new();

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => {
                in_h1 = true;
                text.clear();
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let heading = text.trim();
                if !heading.is_empty() {
                    return Some(heading.to_string());
                }
                in_h1 = false;
            }
            Event::Text(t) | Event::Code(t) if in_h1 => text.push_str(&t),
            _ => {}
        }
    }
    None
}

/// `bigquery-agent-analytics.md` -> `Bigquery Agent Analytics`.
fn title_from_file_name(relative_path: &str) -> String {
    let stem = Path::new(relative_path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    title_case(&stem.replace('-', " "))
}

/// Uppercase the first letter of every run of letters and lowercase the rest.
/// Digits and punctuation start a new run, so `mcp2go` becomes `Mcp2Go`.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_was_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_was_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_was_letter = true;
        } else {
            out.push(c);
            previous_was_letter = false;
        }
    }
    out
}
