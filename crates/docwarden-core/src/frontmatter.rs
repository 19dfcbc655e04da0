// ABOUTME: Parses the YAML front matter block at the top of a markdown page.
// ABOUTME: Exposes key lookups with fallbacks and the markdown body that follows the block.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Delimiter that opens and closes a front matter block.
const DELIMITER: &str = "---";

/// Errors that can occur while parsing a front matter block.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front matter is not a key/value mapping")]
    NotAMapping,
}

/// Parsed front matter fields of a single page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: Mapping,
    /// YAML text of the block as written.
    source: String,
}

/// A markdown page split into its front matter and body.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    pub front_matter: FrontMatter,
    pub body: &'a str,
    /// Whether the page opened with a complete front matter block.
    pub has_front_matter: bool,
}

impl FrontMatter {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Return the first of `keys` whose value is a non-empty scalar, rendered
    /// as text. Null values, empty strings, sequences and nested mappings are
    /// skipped so the next key gets a chance.
    pub fn get_text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.fields.get(*key))
            .filter_map(scalar_text)
            .find(|text| !text.is_empty())
    }

    /// Value of `key` as the page spells it. Numbers keep their source text,
    /// so `1.10` is not folded into `1.1`; other scalars behave as in
    /// [`FrontMatter::get_text`].
    pub fn get_literal(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::Number(n) => {
                Some(source_scalar(&self.source, key).unwrap_or_else(|| n.to_string()))
            }
            other => scalar_text(other).filter(|text| !text.is_empty()),
        }
    }
}

/// Raw text after `key:` on its top-level line, minus any trailing comment.
fn source_scalar(yaml: &str, key: &str) -> Option<String> {
    yaml.lines().find_map(|line| {
        let rest = line.strip_prefix(key)?.trim_start().strip_prefix(':')?;
        let text = match rest.find(" #") {
            Some(at) => &rest[..at],
            None => rest,
        }
        .trim();
        (!text.is_empty()).then(|| text.to_string())
    })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Split raw page content into the YAML text of its front matter block and
/// the remaining body. Returns `None` for the YAML when the content does not
/// start with `---` or the block is never closed.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content.strip_prefix(DELIMITER) else {
        return (None, content);
    };
    match rest.find(DELIMITER) {
        Some(end) => (Some(&rest[..end]), &rest[end + DELIMITER.len()..]),
        None => (None, content),
    }
}

/// Parse a page's front matter. Pages without a block get an empty mapping;
/// an empty or comment-only block is also an empty mapping.
pub fn parse_page(content: &str) -> Result<Page<'_>, FrontMatterError> {
    let (yaml, body) = split_front_matter(content);
    let Some(yaml) = yaml else {
        return Ok(Page {
            front_matter: FrontMatter::default(),
            body,
            has_front_matter: false,
        });
    };

    let blank = yaml
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'));
    let fields = if blank {
        Mapping::new()
    } else {
        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            _ => return Err(FrontMatterError::NotAMapping),
        }
    };

    Ok(Page {
        front_matter: FrontMatter {
            fields,
            source: yaml.to_string(),
        },
        body,
        has_front_matter: true,
    })
}
