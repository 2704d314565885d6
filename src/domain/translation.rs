use std::collections::BTreeMap;

use html_escape::decode_html_entities;
use serde::{Deserialize, Serialize};

/// A selectable translation source (sentence-level or word-by-word).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResource {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub language_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tafsir {
    #[serde(default)]
    pub resource_id: u32,
    #[serde(default)]
    pub text: String,
}

impl Tafsir {
    pub fn plain_text(&self) -> String {
        plain_text(&self.text)
    }
}

/// Terminal rendering of translation or tafsir markup: tags removed,
/// footnote markers (`<sup>…</sup>`) dropped with their content, entities
/// decoded and whitespace collapsed.
pub fn plain_text(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut rest = html;
    let mut last_was_space = false;

    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix('<') {
            let Some(end) = tail.find('>') else {
                // No closing bracket: a literal less-than sign.
                result.push('<');
                last_was_space = false;
                rest = tail;
                continue;
            };
            let tag = &tail[..end];
            rest = &tail[end + 1..];

            if tag.starts_with("sup") {
                rest = match rest.find("</sup>") {
                    Some(close) => &rest[close + "</sup>".len()..],
                    None => "",
                };
            }
            continue;
        }

        let next_tag = rest.find('<').unwrap_or(rest.len());
        for c in decode_html_entities(&rest[..next_tag]).chars() {
            if c.is_whitespace() {
                if !last_was_space {
                    result.push(' ');
                    last_was_space = true;
                }
            } else {
                result.push(c);
                last_was_space = false;
            }
        }
        rest = &rest[next_tag..];
    }

    result.trim().to_string()
}

/// Group resources by language name for selection menus.
pub fn group_by_language(
    resources: &[TranslationResource],
) -> BTreeMap<String, Vec<TranslationResource>> {
    let mut groups: BTreeMap<String, Vec<TranslationResource>> = BTreeMap::new();
    for resource in resources {
        groups
            .entry(resource.language_name.clone())
            .or_default()
            .push(resource.clone());
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| a.name.cmp(&b.name));
    }
    groups
}

/// Case-insensitive match on resource name, author or language.
pub fn filter_resources<'a>(
    resources: &'a [TranslationResource],
    term: &str,
) -> Vec<&'a TranslationResource> {
    let term = term.trim().to_lowercase();
    resources
        .iter()
        .filter(|r| {
            term.is_empty()
                || r.name.to_lowercase().contains(&term)
                || r.language_name.to_lowercase().contains(&term)
                || r.author_name
                    .as_deref()
                    .is_some_and(|a| a.to_lowercase().contains(&term))
        })
        .collect()
}
