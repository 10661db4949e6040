//! Tolerant parser for the model's `title : … / content : …` output.
//!
//! The backend is prompted to answer with exactly two labeled fields but is
//! not guaranteed to comply, so extraction never fails: a missing title
//! falls back to a sentinel and missing content falls back to the whole
//! trimmed response.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Sentinel title used when the model output carries no `title:` label.
pub const NO_TITLE: &str = "제목 없음";

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)title\s*:\s*([^\n]+)").expect("title pattern"));

static CONTENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)content\s*:\s*(.*)").expect("content pattern"));

static TITLE_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)title\s*:").expect("title label pattern"));

/// A parsed title/content pair. Both fields are always non-empty for any
/// non-empty input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedText {
    pub title: String,
    pub content: String,
}

/// Extracts a `GeneratedText` from raw model output.
///
/// Title: first case-insensitive `title:` label, captured to end of line.
/// Content: first case-insensitive `content:` label, captured up to the
/// next `title:` label or end of input. Both captures are trimmed.
pub fn parse_generated_text(raw: &str) -> GeneratedText {
    let title = TITLE_RE
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let content = CONTENT_RE
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| {
            // The regex crate has no lookahead; stop the capture at the
            // next title label by hand.
            let rest = m.as_str();
            let end = TITLE_LABEL_RE
                .find(rest)
                .map(|t| t.start())
                .unwrap_or(rest.len());
            rest[..end].trim().to_string()
        })
        .unwrap_or_else(|| raw.trim().to_string());

    GeneratedText { title, content }
}
