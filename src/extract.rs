//! Title and abstract extraction from markdown text.
//!
//! This is a single forward scan over the lines of a document. It does not
//! parse markdown: the title is the first level-1 heading and the abstract is
//! the first line after it that looks like prose.

use regex::Regex;
use std::fs::Metadata;
use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

/// Abstracts longer than this many characters are cut.
pub const DEFAULT_ABSTRACT_LIMIT: usize = 120;

/// Leading characters that mark a line as markup rather than prose.
pub const DEFAULT_SKIP_CHARS: [char; 7] = ['!', '#', '(', '-', '.', ':', '['];

/// Appended to an abstract that was cut at the limit.
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractRules {
    pub abstract_limit: usize,
    pub skip_chars: Vec<char>,
}

impl Default for ExtractRules {
    fn default() -> Self {
        Self {
            abstract_limit: DEFAULT_ABSTRACT_LIMIT,
            skip_chars: DEFAULT_SKIP_CHARS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub title: String,
    pub abstract_text: String,
}

pub struct Extractor {
    heading: Regex,
    line_break: Regex,
    rules: ExtractRules,
}

impl Extractor {
    pub fn new(rules: ExtractRules) -> Self {
        Self {
            heading: Regex::new(r"^# (.*)").expect("heading pattern is valid"),
            line_break: Regex::new(r"\r\n|\r|\n").expect("line break pattern is valid"),
            rules,
        }
    }

    pub fn extract(&self, text: &str) -> Summary {
        let mut title: Option<String> = None;
        let mut abstract_text: Option<String> = None;

        // A lone `\r` ends a line too.
        for line in self.line_break.split(text) {
            // The candidate check runs before the heading check, so the line
            // that sets the title is never its own abstract.
            if title.is_some() {
                if let Some(candidate) = self.abstract_candidate(line) {
                    abstract_text = Some(candidate);
                }
            }
            if title.is_none() {
                if let Some(caps) = self.heading.captures(line) {
                    title = Some(caps[1].trim().to_string());
                }
            }
            if title.is_some() && abstract_text.is_some() {
                break;
            }
        }

        Summary {
            title: title.unwrap_or_default(),
            abstract_text: abstract_text.unwrap_or_default(),
        }
    }

    fn abstract_candidate(&self, line: &str) -> Option<String> {
        let line = line.trim();
        let first = line.chars().next()?;
        if self.rules.skip_chars.contains(&first) {
            return None;
        }
        match line.char_indices().nth(self.rules.abstract_limit) {
            Some((cut, _)) => Some(format!("{}{ELLIPSIS}", &line[..cut])),
            None => Some(line.to_string()),
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractRules::default())
    }
}

/// Modification time in whole seconds, rounded half up.
pub fn modified_secs(metadata: &Metadata) -> io::Result<i64> {
    Ok(round_secs(metadata.modified()?))
}

/// `trunc(t + 0.5)` of the offset from the epoch, negative before it.
pub fn round_secs(time: SystemTime) -> i64 {
    let secs = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_secs_f64(),
        Err(before) => -before.duration().as_secs_f64(),
    };
    (secs + 0.5).trunc() as i64
}
