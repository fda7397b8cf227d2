//! Whitespace normalization for extracted page text.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref LINE_BREAK: Regex = Regex::new(r"\r\n|\r").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n{2,}").unwrap();
    static ref HORIZONTAL_SPACE: Regex = Regex::new(r"[ \t\x0B\x0C]+").unwrap();
}

/// Which normalization passes to run.
///
/// Line endings are always unified to `\n`; the flags control the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Collapse runs of spaces, tabs, vertical tabs and form feeds to one space.
    pub spaces: bool,
    /// Collapse consecutive line breaks to one.
    pub newlines: bool,
    /// Trim every line and the text as a whole.
    pub trim: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            spaces: true,
            newlines: true,
            trim: true,
        }
    }
}

/// Normalize `text` according to `options`.
pub fn normalize(text: &str, options: &NormalizeOptions) -> String {
    let mut out = LINE_BREAK.replace_all(text, "\n").into_owned();
    if options.newlines {
        out = BLANK_LINES.replace_all(&out, "\n").into_owned();
    }
    if options.spaces {
        out = HORIZONTAL_SPACE.replace_all(&out, " ").into_owned();
    }
    if options.trim {
        out = out
            .split('\n')
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();
    }
    out
}
