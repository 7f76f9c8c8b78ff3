//! Candidate list shaping: trim, dedup, rank, and rank-prefix stripping.

use std::fmt;

use regex_lite::Regex;

/// One generated commit message with its 1-based display rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionCandidate {
    pub rank: usize,
    pub text: String,
}

impl SuggestionCandidate {
    /// The presentation form, `"<rank>. <text>"`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SuggestionCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.rank, self.text)
    }
}

/// Collapse completion texts into ranked candidates.
///
/// Texts are trimmed of surrounding whitespace, duplicates collapse to the
/// first occurrence, empty texts are dropped, and ranks run contiguously
/// from 1 in first-seen order.
pub fn rank_unique(texts: impl IntoIterator<Item = String>) -> Vec<SuggestionCandidate> {
    let mut unique: Vec<String> = Vec::new();

    for text in texts {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !unique.iter().any(|seen| seen == trimmed) {
            unique.push(trimmed.to_string());
        }
    }

    unique
        .into_iter()
        .enumerate()
        .map(|(i, text)| SuggestionCandidate { rank: i + 1, text })
        .collect()
}

/// Remove the leading `"<rank>. "` prefix from a selected label.
///
/// A label is stripped exactly once; text without a rank prefix passes
/// through unchanged.
pub fn strip_rank(label: &str) -> String {
    let re = Regex::new(r"^\d+\.\s*").expect("Invalid regex");
    re.replace(label, "").into_owned()
}
