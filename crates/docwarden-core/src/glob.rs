// ABOUTME: Minimal path glob matcher for docs-relative paths like `tools/google-cloud/*.md`.
// ABOUTME: Supports `*`, `?`, `**` and bracket classes by translating the glob into an anchored regex.

use regex::Regex;

/// A compiled glob that matches `/`-separated relative paths.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compile a glob. `*` and `?` never cross a `/`; `**` matches any
    /// number of directories (including none when followed by `/`).
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let pattern = pattern.trim_start_matches("./");
        let regex = Regex::new(&translate(pattern))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, relative_path: &str) -> bool {
        self.regex.is_match(relative_path)
    }
}

fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from("^");
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                if chars.get(i + 2) == Some(&'/') {
                    out.push_str("(?:.*/)?");
                    i += 3;
                } else {
                    out.push_str(".*");
                    i += 2;
                }
                continue;
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '[' => match chars[i + 1..].iter().position(|c| *c == ']') {
                Some(offset) if offset > 0 => {
                    out.push('[');
                    push_class(&mut out, &chars[i + 1..i + 1 + offset]);
                    out.push(']');
                    i += offset + 2;
                    continue;
                }
                _ => out.push_str(r"\["),
            },
            c => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
        i += 1;
    }

    out.push('$');
    out
}

/// Body of a bracket class. A leading `!` negates; `a-z` between two plain
/// characters stays a range. Everything else is literal, so regex class
/// operators like `&&`, `--` and `~~` never take effect.
fn push_class(out: &mut String, class: &[char]) {
    let body = match class.split_first() {
        Some(('!', rest)) if !rest.is_empty() => {
            out.push('^');
            rest
        }
        _ => class,
    };

    let mut at = 0;
    while at < body.len() {
        match body.get(at..at + 3) {
            Some(&[start, '-', end]) if start <= end => {
                push_class_char(out, start);
                out.push('-');
                push_class_char(out, end);
                at += 3;
            }
            _ => {
                push_class_char(out, body[at]);
                at += 1;
            }
        }
    }
}

fn push_class_char(out: &mut String, c: char) {
    if matches!(c, '\\' | '[' | ']' | '^' | '&' | '-' | '~') {
        out.push('\\');
    }
    out.push(c);
}
