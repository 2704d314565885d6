use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::app::Result;
use crate::domain::address::VerseKey;

/// Word glosses keyed by language code (`"en"`, `"ur"`, ...).
///
/// A missing key means no gloss is available for that language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Glosses(BTreeMap<String, String>);

impl Glosses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.0.get(language).map(String::as_str)
    }

    pub fn insert(&mut self, language: impl Into<String>, text: impl Into<String>) {
        self.0.insert(language.into(), text.into());
    }

    pub fn contains(&self, language: &str) -> bool {
        self.0.contains_key(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: u64,
    /// Arabic token in Uthmani script.
    pub uthmani: String,
    pub glosses: Glosses,
    /// Upstream fields this crate does not interpret, kept for presentation.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Word {
    pub fn gloss(&self, language: &str) -> Option<&str> {
        self.glosses.get(language)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(default)]
    pub resource_id: u32,
    /// Rendered text, possibly with inline markup from the source.
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Translation {
    /// Text with markup removed, for terminals.
    pub fn plain_text(&self) -> String {
        super::translation::plain_text(&self.text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    pub id: u64,
    pub verse_key: String,
    pub text_uthmani: String,
    pub words: Vec<Word>,
    pub translations: Vec<Translation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Verse {
    pub fn key(&self) -> Result<VerseKey> {
        self.verse_key.parse()
    }

    pub fn has_words(&self) -> bool {
        !self.words.is_empty()
    }

    /// Arabic text assembled from words when upstream omitted the verse text.
    pub fn arabic_text(&self) -> String {
        if !self.text_uthmani.is_empty() || self.words.is_empty() {
            return self.text_uthmani.clone();
        }
        self.words
            .iter()
            .map(|w| w.uthmani.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn translation(&self, resource_id: u32) -> Option<&Translation> {
        self.translations
            .iter()
            .find(|t| t.resource_id == resource_id)
    }
}
