//! Math span scanner
//!
//! Splits text into an ordered sequence of plain-text and math [`Segment`]s.
//! Math regions are bounded by the delimiter pairs of a [`DelimiterSpec`]
//! list. Inside a region, braces nest and a backslash escapes the following
//! character, so `$$ a{$$}b $$` and `$a\$b$` are each a single region.
//!
//! Unterminated delimiters are not an error: scanning stops and the rest of
//! the input is returned as text.
//!
//! ## Example
//!
//! ```rust
//! use mathfence::core::delimiters::DelimiterSpec;
//! use mathfence::core::scanner::{split_at_delimiters, Segment};
//!
//! let delims = vec![DelimiterSpec::inline("$", "$")];
//! let segments = split_at_delimiters("area $\\pi r^2$ here", &delims);
//! assert_eq!(segments.len(), 3);
//! assert!(matches!(segments[1], Segment::Math { content: "\\pi r^2", .. }));
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use super::delimiters::DelimiterSpec;
use crate::utils::error::DelimiterError;

lazy_static! {
    /// Regions whose delimiters are themselves TeX syntax
    static ref AMS_PREFIX: Regex = Regex::new(r"^\\(?:begin|(?:eq)?ref)\{").unwrap();
}

/// One piece of scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Segment<'a> {
    /// Plain text, verbatim
    Text { content: &'a str },
    /// A math region
    Math {
        /// Source handed to the renderer
        content: &'a str,
        /// The region including its delimiters
        #[cfg_attr(feature = "serde", serde(rename = "rawContent"))]
        raw: &'a str,
        display: bool,
    },
}

impl<'a> Segment<'a> {
    /// The original text this segment was cut from
    pub fn original(&self) -> &'a str {
        match self {
            Segment::Text { content } => content,
            Segment::Math { raw, .. } => raw,
        }
    }

    pub fn is_math(&self) -> bool {
        matches!(self, Segment::Math { .. })
    }
}

/// A compiled delimiter list
#[derive(Debug, Clone)]
pub struct MathScanner {
    delimiters: Vec<DelimiterSpec>,
    left_pattern: Option<Regex>,
}

impl MathScanner {
    /// Compile a scanner; fails if a left delimiter is empty
    pub fn new(delimiters: &[DelimiterSpec]) -> Result<Self, DelimiterError> {
        if let Some(index) = delimiters.iter().position(|d| d.left.is_empty()) {
            return Err(DelimiterError::EmptyLeft { index });
        }

        let left_pattern = if delimiters.is_empty() {
            None
        } else {
            let alternation = delimiters
                .iter()
                .map(|d| regex::escape(&d.left))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!("({})", alternation))?)
        };

        Ok(Self {
            delimiters: delimiters.to_vec(),
            left_pattern,
        })
    }

    pub fn delimiters(&self) -> &[DelimiterSpec] {
        &self.delimiters
    }

    /// Split `text` into text and math segments
    pub fn split<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut rest = text;

        if let Some(pattern) = &self.left_pattern {
            while let Some(found) = pattern.find(rest) {
                let (before, at) = rest.split_at(found.start());

                // `at` starts with a left delimiter, so this always succeeds
                let Some(delim) = self
                    .delimiters
                    .iter()
                    .find(|d| at.starts_with(d.left.as_ref()))
                else {
                    break;
                };

                // Unterminated: the rest, including `before`, stays text
                let Some(end) = find_end_of_math(&delim.right, at, delim.left.len()) else {
                    break;
                };

                if !before.is_empty() {
                    segments.push(Segment::Text { content: before });
                }

                let raw = &at[..end + delim.right.len()];
                let content = if AMS_PREFIX.is_match(raw) {
                    raw
                } else {
                    &at[delim.left.len()..end]
                };
                segments.push(Segment::Math {
                    content,
                    raw,
                    display: delim.display,
                });
                rest = &at[end + delim.right.len()..];
            }
        }

        if !rest.is_empty() {
            segments.push(Segment::Text { content: rest });
        }

        segments
    }
}

/// Split `text` at `delimiters`.
///
/// A delimiter list that cannot be compiled is logged and treated as matching
/// nothing, so the whole input comes back as one text segment.
pub fn split_at_delimiters<'a>(text: &'a str, delimiters: &[DelimiterSpec]) -> Vec<Segment<'a>> {
    match MathScanner::new(delimiters) {
        Ok(scanner) => scanner.split(text),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unusable delimiter list");
            if text.is_empty() {
                Vec::new()
            } else {
                vec![Segment::Text { content: text }]
            }
        }
    }
}

/// Byte offset of the first `delimiter` at or after `start` that sits at
/// brace depth zero and is not escaped by a backslash.
pub fn find_end_of_math(delimiter: &str, text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let delim = delimiter.as_bytes();
    let mut index = start;
    let mut brace_level: i32 = 0;

    while index < bytes.len() {
        let byte = bytes[index];

        if brace_level <= 0 && bytes[index..].starts_with(delim) {
            return Some(index);
        } else if byte == b'\\' {
            index += 1;
        } else if byte == b'{' {
            brace_level += 1;
        } else if byte == b'}' {
            brace_level -= 1;
        }

        index += 1;
    }

    None
}
