//! Tajweed markup for Arabic text.
//!
//! The transducer scans left to right. At each position every rule in the
//! table is tried; the longest match wins and ties go to the rule listed
//! first in [`RULES`]. Matched runs are wrapped as
//! `<tajweed class="ghunnah">…</tajweed>`; everything else passes through.
//!
//! Input that already contains `<tajweed …>…</tajweed>` spans is accepted:
//! those spans are copied verbatim and never re-scanned, so applying the
//! transducer to its own output is a no-op. An opening marker without a
//! closing one makes the rest of the input opaque.

pub mod rules;

use crate::domain::Word;

pub use rules::{Category, Rule, RULES};

const OPEN_TAG: &str = "<tajweed";
const CLOSE_TAG: &str = "</tajweed>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Classified { category: Category, text: &'a str },
    /// A span that was already marked up in the input.
    Markup(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(text) | Segment::Markup(text) => text,
            Segment::Classified { text, .. } => text,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            Segment::Classified { category, .. } => Some(*category),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Transducer {
    rules: &'static [Rule],
}

impl Default for Transducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transducer {
    pub fn new() -> Self {
        Self::with_rules(&RULES)
    }

    pub fn with_rules(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    pub fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let chars: Vec<char> = text.chars().collect();
        let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        offsets.push(text.len());

        let mut segments = Vec::new();
        let mut plain_start = 0;
        let mut i = 0;

        while i < chars.len() {
            let start = offsets[i];

            if chars[i] == '<' && text[start..].starts_with(OPEN_TAG) {
                let end = match text[start..].find(CLOSE_TAG) {
                    Some(pos) => start + pos + CLOSE_TAG.len(),
                    None => text.len(),
                };
                push_plain(&mut segments, text, plain_start, start);
                segments.push(Segment::Markup(&text[start..end]));
                i = offsets.partition_point(|&o| o < end);
                plain_start = end;
                continue;
            }

            let window_end = (i + rules::MAX_RULE_WIDTH).min(chars.len());
            match self.best_match(&chars[i..window_end]) {
                Some((category, len)) => {
                    let end = offsets[i + len];
                    push_plain(&mut segments, text, plain_start, start);
                    segments.push(Segment::Classified {
                        category,
                        text: &text[start..end],
                    });
                    i += len;
                    plain_start = end;
                }
                None => i += 1,
            }
        }
        push_plain(&mut segments, text, plain_start, text.len());

        debug_assert_eq!(
            segments.iter().map(|s| s.text().len()).sum::<usize>(),
            text.len(),
            "tajweed segments must cover the input exactly"
        );

        segments
    }

    /// Longest match at the start of `window`; ties keep the earlier rule.
    fn best_match(&self, window: &[char]) -> Option<(Category, usize)> {
        let mut best: Option<(Category, usize)> = None;
        for rule in self.rules {
            let len = (rule.matcher)(window).min(window.len());
            if len > 0 && best.is_none_or(|(_, best_len)| len > best_len) {
                best = Some((rule.category, len));
            }
        }
        best
    }

    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + text.len() / 2);
        for segment in self.segments(text) {
            match segment {
                Segment::Plain(t) | Segment::Markup(t) => out.push_str(t),
                Segment::Classified { category, text } => {
                    out.push_str(OPEN_TAG);
                    out.push_str(" class=\"");
                    out.push_str(category.class());
                    out.push_str("\">");
                    out.push_str(text);
                    out.push_str(CLOSE_TAG);
                }
            }
        }
        out
    }

    /// Word-level rendering; each word is scanned on its own.
    pub fn apply_words(&self, words: &[Word]) -> Vec<String> {
        words.iter().map(|w| self.apply(&w.uthmani)).collect()
    }
}

fn push_plain<'a>(segments: &mut Vec<Segment<'a>>, text: &'a str, start: usize, end: usize) {
    if start < end {
        segments.push(Segment::Plain(&text[start..end]));
    }
}

/// Shorthand for [`Transducer::apply`] with the default rule table.
pub fn apply(text: &str) -> String {
    Transducer::new().apply(text)
}

/// Remove `<tajweed …>` and `</tajweed>` tags, keeping their content.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix(CLOSE_TAG) {
            rest = after;
        } else if tail.starts_with(OPEN_TAG) {
            match tail.find('>') {
                Some(end) => rest = &tail[end + 1..],
                None => {
                    out.push_str(tail);
                    rest = "";
                }
            }
        } else {
            out.push('<');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}
