use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::{Result, TartilError};

pub const CHAPTER_COUNT: u16 = 114;
pub const SECTION_COUNT: u16 = 30;
pub const PAGE_COUNT: u16 = 604;

/// One of the three independent ways to address a run of verses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Chapter,
    /// A juz, one of the thirty reading divisions.
    Section,
    Page,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Chapter, Scheme::Section, Scheme::Page];

    pub fn max_id(self) -> u16 {
        match self {
            Scheme::Chapter => CHAPTER_COUNT,
            Scheme::Section => SECTION_COUNT,
            Scheme::Page => PAGE_COUNT,
        }
    }

    /// Path segment used by the verses endpoints, e.g. `by_juz`.
    pub fn endpoint(self) -> &'static str {
        match self {
            Scheme::Chapter => "by_chapter",
            Scheme::Section => "by_juz",
            Scheme::Page => "by_page",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Chapter => "chapter",
            Scheme::Section => "juz",
            Scheme::Page => "page",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scheme::Chapter => "Surah",
            Scheme::Section => "Juz",
            Scheme::Page => "Page",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated chapter, juz or page identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    scheme: Scheme,
    id: u16,
}

impl Address {
    pub fn new(scheme: Scheme, id: u32) -> Result<Self> {
        if id == 0 || id > u32::from(scheme.max_id()) {
            return Err(TartilError::InvalidAddress {
                scheme: scheme.name(),
                id,
            });
        }
        Ok(Self {
            scheme,
            id: id as u16,
        })
    }

    pub fn chapter(id: u32) -> Result<Self> {
        Self::new(Scheme::Chapter, id)
    }

    pub fn section(id: u32) -> Result<Self> {
        Self::new(Scheme::Section, id)
    }

    pub fn page(id: u32) -> Result<Self> {
        Self::new(Scheme::Page, id)
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn id(&self) -> u16 {
        self.id
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.scheme, self.id)
    }
}

/// Parsed form of a `"<chapter>:<verse>"` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VerseKey {
    pub chapter: u16,
    pub verse: u16,
}

impl FromStr for VerseKey {
    type Err = TartilError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TartilError::InvalidVerseKey(s.to_string());
        let (chapter, verse) = s.trim().split_once(':').ok_or_else(invalid)?;
        let chapter: u16 = chapter.parse().map_err(|_| invalid())?;
        let verse: u16 = verse.parse().map_err(|_| invalid())?;

        if chapter == 0 || chapter > CHAPTER_COUNT || verse == 0 {
            return Err(invalid());
        }

        Ok(Self { chapter, verse })
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_bounds() {
        assert!(Address::chapter(1).is_ok());
        assert!(Address::chapter(114).is_ok());
        assert!(Address::chapter(115).is_err());
        assert!(Address::section(30).is_ok());
        assert!(Address::section(31).is_err());
        assert!(Address::page(604).is_ok());
        assert!(Address::page(0).is_err());
    }

    #[test]
    fn test_invalid_address_names_scheme() {
        let err = Address::page(605).unwrap_err();
        assert_eq!(err.to_string(), "Invalid page id: 605");
    }

    #[test]
    fn test_scheme_endpoints() {
        assert_eq!(Scheme::Chapter.endpoint(), "by_chapter");
        assert_eq!(Scheme::Section.endpoint(), "by_juz");
        assert_eq!(Scheme::Page.endpoint(), "by_page");
    }

    #[test]
    fn test_verse_key_parse() {
        let key: VerseKey = "2:255".parse().unwrap();
        assert_eq!(key.chapter, 2);
        assert_eq!(key.verse, 255);
        assert_eq!(key.to_string(), "2:255");
    }

    #[test]
    fn test_verse_key_rejects_garbage() {
        assert!("2".parse::<VerseKey>().is_err());
        assert!("a:b".parse::<VerseKey>().is_err());
        assert!("0:1".parse::<VerseKey>().is_err());
        assert!("115:1".parse::<VerseKey>().is_err());
        assert!("1:0".parse::<VerseKey>().is_err());
    }
}
