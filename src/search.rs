//! Search-term highlighting and FAQ filtering.
//!
//! A [`Highlighter`] is compiled once per search term and then applied to
//! any number of texts. Matching is case-insensitive and scans left to right
//! without overlaps, so `"aa"` in `"aaa"` matches once.

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::warn;

/// How the search term is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The term is matched as literal text.
    #[default]
    Literal,
    /// The term is used as a regular expression. Terms that fail to
    /// compile are matched literally instead.
    Pattern,
}

/// A contiguous run of text, tagged by whether it matched the term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub is_match: bool,
}

impl<'a> Segment<'a> {
    pub fn plain(text: &'a str) -> Self {
        Self {
            text,
            is_match: false,
        }
    }

    pub fn matched(text: &'a str) -> Self {
        Self {
            text,
            is_match: true,
        }
    }
}

/// The searchable parts of a help-center entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    pub tags: Vec<String>,
}

/// Case-insensitive matcher for one search term.
#[derive(Debug, Clone)]
pub struct Highlighter {
    term: String,
    matcher: Option<Regex>,
}

impl Highlighter {
    pub fn new(term: &str, mode: MatchMode) -> Self {
        if term.is_empty() {
            return Self {
                term: String::new(),
                matcher: None,
            };
        }

        let compiled = match mode {
            MatchMode::Literal => compile(&regex::escape(term)),
            MatchMode::Pattern => compile(term).or_else(|err| {
                warn!(term, %err, "search term is not a valid pattern, matching literally");
                compile(&regex::escape(term))
            }),
        };

        let matcher = match compiled {
            Ok(regex) => Some(regex),
            Err(err) => {
                warn!(term_len = term.len(), %err, "search term rejected, highlighting disabled");
                None
            }
        };

        Self {
            term: term.to_string(),
            matcher,
        }
    }

    /// Split `text` into matched and unmatched runs.
    ///
    /// Concatenating the segment texts always gives back `text`. Without a
    /// term, or without any match, the result is a single unmatched segment.
    pub fn segments<'t>(&self, text: &'t str) -> Vec<Segment<'t>> {
        let Some(matcher) = &self.matcher else {
            return vec![Segment::plain(text)];
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for found in matcher.find_iter(text) {
            if found.is_empty() {
                continue;
            }
            if found.start() > last {
                segments.push(Segment::plain(&text[last..found.start()]));
            }
            segments.push(Segment::matched(found.as_str()));
            last = found.end();
        }

        if last < text.len() || segments.is_empty() {
            segments.push(Segment::plain(&text[last..]));
        }

        segments
    }

    /// Whether the term occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|matcher| matcher.find_iter(text).any(|m| !m.is_empty()))
    }

    /// Whether an entry should be listed for this term. A blank term lists
    /// everything.
    pub fn matches_entry(&self, entry: &FaqEntry) -> bool {
        if self.term.trim().is_empty() {
            return true;
        }

        self.is_match(&entry.question)
            || self.is_match(&entry.answer)
            || entry.tags.iter().any(|tag| self.is_match(tag))
    }
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Highlight `term` in `text`, matching the term as literal text.
pub fn highlight<'t>(text: &'t str, term: &str) -> Vec<Segment<'t>> {
    Highlighter::new(term, MatchMode::Literal).segments(text)
}
