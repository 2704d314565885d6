use serde_json::{Map, Value};

use crate::app::{Result, TartilError};
use crate::domain::{Glosses, Translation, Verse, Word};

/// Converts loosely-shaped upstream records into the canonical verse model.
///
/// Only the fields listed on [`Verse`] and [`Word`] are interpreted; every
/// other upstream field is carried through in `extra`.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize_verses(&self, raw: Vec<Value>, language: &str) -> Result<Vec<Verse>> {
        raw.into_iter()
            .map(|v| self.normalize_verse(v, language))
            .collect()
    }

    pub fn normalize_verse(&self, raw: Value, language: &str) -> Result<Verse> {
        let mut fields = into_object(raw, "verse")?;
        let id = take_id(&mut fields, "id", "verse")?;

        let verse_key = take_string(&mut fields, "verse_key").unwrap_or_default();
        let text_uthmani = take_string(&mut fields, "text_uthmani").unwrap_or_default();

        let words = match fields.remove("words") {
            Some(Value::Array(words)) => words
                .into_iter()
                .map(|w| self.normalize_word(w, language))
                .collect::<Result<Vec<_>>>()?,
            _ => Vec::new(),
        };

        let translations = take_translations(&mut fields)?;

        Ok(Verse {
            id,
            verse_key,
            text_uthmani,
            words,
            translations,
            extra: fields,
        })
    }

    /// The transcription comes from `text_uthmani`, falling back to `text`;
    /// `translation.text` becomes the gloss for `language` when present.
    pub fn normalize_word(&self, raw: Value, language: &str) -> Result<Word> {
        let mut fields = into_object(raw, "word")?;
        let id = take_id(&mut fields, "id", "word")?;

        let uthmani = str_field(&fields, "text_uthmani")
            .or_else(|| str_field(&fields, "text"))
            .unwrap_or_default()
            .to_string();

        let mut glosses = Glosses::new();
        if let Some(text) = fields
            .get("translation")
            .and_then(|t| t.get("text"))
            .and_then(Value::as_str)
        {
            glosses.insert(language, text);
        }

        Ok(Word {
            id,
            uthmani,
            glosses,
            extra: fields,
        })
    }

    /// Search hits carry no word data, so only id, key, text and
    /// translations are filled in.
    pub fn normalize_search_hit(&self, raw: Value) -> Result<Verse> {
        let mut fields = into_object(raw, "search result")?;
        let id = take_id(&mut fields, "verse_id", "search result")?;

        Ok(Verse {
            id,
            verse_key: take_string(&mut fields, "verse_key").unwrap_or_default(),
            text_uthmani: take_string(&mut fields, "text").unwrap_or_default(),
            words: Vec::new(),
            translations: take_translations(&mut fields)?,
            extra: Map::new(),
        })
    }
}

fn into_object(raw: Value, kind: &str) -> Result<Map<String, Value>> {
    match raw {
        Value::Object(fields) => Ok(fields),
        other => Err(TartilError::MalformedRecord(format!(
            "expected {} object, got {}",
            kind,
            type_name(&other)
        ))),
    }
}

fn take_id(fields: &mut Map<String, Value>, key: &str, kind: &str) -> Result<u64> {
    let id = match fields.remove(key) {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    };
    id.ok_or_else(|| TartilError::MalformedRecord(format!("{} record without {}", kind, key)))
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

fn take_translations(fields: &mut Map<String, Value>) -> Result<Vec<Translation>> {
    match fields.remove("translations") {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|t| {
                serde_json::from_value(t).map_err(|source| TartilError::Decode {
                    operation: "translation",
                    source,
                })
            })
            .collect(),
        _ => Ok(Vec::new()),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
