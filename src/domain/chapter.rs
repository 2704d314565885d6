use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedName {
    #[serde(default)]
    pub language_name: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u16,
    #[serde(default)]
    pub name_simple: String,
    #[serde(default)]
    pub name_arabic: String,
    /// `makkah` or `madinah` as reported upstream.
    #[serde(default)]
    pub revelation_place: String,
    #[serde(default)]
    pub verses_count: Option<u32>,
    #[serde(default)]
    pub translated_name: Option<TranslatedName>,
}

impl Chapter {
    pub fn display_name(&self) -> &str {
        if self.name_simple.is_empty() {
            &self.name_arabic
        } else {
            &self.name_simple
        }
    }
}

/// Metadata for one juz: which verse range of which chapter it spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JuzInfo {
    #[serde(default)]
    pub id: u32,
    pub juz_number: u16,
    /// Chapter id → verse range, e.g. `"2" → "142-252"`.
    #[serde(default)]
    pub verse_mapping: std::collections::BTreeMap<String, String>,
    #[serde(default)]
    pub first_verse_id: Option<u64>,
    #[serde(default)]
    pub last_verse_id: Option<u64>,
    #[serde(default)]
    pub verses_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_deserializes_with_missing_optionals() {
        let chapter: Chapter =
            serde_json::from_str(r#"{"id": 1, "name_simple": "Al-Fatihah"}"#).unwrap();
        assert_eq!(chapter.id, 1);
        assert_eq!(chapter.display_name(), "Al-Fatihah");
        assert_eq!(chapter.revelation_place, "");
        assert!(chapter.verses_count.is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_arabic() {
        let chapter: Chapter =
            serde_json::from_str(r#"{"id": 1, "name_arabic": "الفاتحة"}"#).unwrap();
        assert_eq!(chapter.display_name(), "الفاتحة");
    }
}
