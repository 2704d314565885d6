//! Color configuration for the TUI.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

use crate::tajweed::Category;

/// Configuration for all TUI colors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub active_border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub inactive_border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg_active: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg_active: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg_inactive: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg_inactive: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub arabic_text: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub verse_key: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub translation_text: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub word_gloss: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub tajweed_ghunnah: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub tajweed_iqlab: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub tajweed_madd: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub tajweed_qalqalah: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub tajweed_ham_wasl: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub tajweed_silent: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            active_border: Color::Cyan,
            inactive_border: Color::DarkGray,
            selection_bg_active: Color::Cyan,
            selection_fg_active: Color::Black,
            selection_bg_inactive: Color::DarkGray,
            selection_fg_inactive: Color::White,
            arabic_text: Color::White,
            verse_key: Color::Yellow,
            translation_text: Color::Gray,
            word_gloss: Color::DarkGray,
            tajweed_ghunnah: Color::Rgb(0xFF, 0x7E, 0x1E),
            tajweed_iqlab: Color::Rgb(0x26, 0xBF, 0xFD),
            tajweed_madd: Color::Rgb(0xD5, 0x00, 0xB7),
            tajweed_qalqalah: Color::Rgb(0xDD, 0x00, 0x08),
            tajweed_ham_wasl: Color::Rgb(0xAA, 0xAA, 0xAA),
            tajweed_silent: Color::Rgb(0xAA, 0xAA, 0xAA),
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

impl ColorConfig {
    pub fn tajweed_color(&self, category: Category) -> Color {
        match category {
            Category::Ghunnah => self.tajweed_ghunnah,
            Category::Iqlab => self.tajweed_iqlab,
            Category::Madd => self.tajweed_madd,
            Category::Qalqalah => self.tajweed_qalqalah,
            Category::HamWasl => self.tajweed_ham_wasl,
            Category::Silent => self.tajweed_silent,
        }
    }
}

/// Custom deserializer for Color that supports named colors and hex codes.
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

const NAMED_COLORS: [(&str, Color); 19] = [
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("magenta", Color::Magenta),
    ("cyan", Color::Cyan),
    ("gray", Color::Gray),
    ("grey", Color::Gray),
    ("darkgray", Color::DarkGray),
    ("darkgrey", Color::DarkGray),
    ("lightred", Color::LightRed),
    ("lightgreen", Color::LightGreen),
    ("lightyellow", Color::LightYellow),
    ("lightblue", Color::LightBlue),
    ("lightmagenta", Color::LightMagenta),
    ("lightcyan", Color::LightCyan),
    ("white", Color::White),
    ("reset", Color::Reset),
];

/// Parse a named color (case-insensitive) or a hex code.
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();
    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    let lower = s.to_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, color)| *color)
        .ok_or_else(|| format!("Unknown color: {}", s))
}

/// Parse "#RRGGBB" or "#RGB".
fn parse_hex_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    if !hex.is_ascii() {
        return Err(format!("Invalid hex color: {}", s));
    }

    let channel =
        |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| format!("Invalid hex color: {}", s));

    match hex.len() {
        6 => Ok(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => Ok(Color::Rgb(
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        )),
        _ => Err(format!("Invalid hex color format: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color_string("Cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string(" darkgrey ").unwrap(), Color::DarkGray);
        assert_eq!(parse_color_string("LIGHTMAGENTA").unwrap(), Color::LightMagenta);
        assert!(parse_color_string("teal").is_err());
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(parse_color_string("#FF7E1E").unwrap(), Color::Rgb(255, 126, 30));
        assert_eq!(parse_color_string("#aaa").unwrap(), Color::Rgb(170, 170, 170));
        assert!(parse_color_string("#GGGGGG").is_err());
        assert!(parse_color_string("#12345").is_err());
        assert!(parse_color_string("#\u{00e9}a").is_err());
    }

    #[test]
    fn test_tajweed_color_per_category() {
        let colors = ColorConfig {
            tajweed_madd: Color::Green,
            ..Default::default()
        };
        assert_eq!(colors.tajweed_color(Category::Madd), Color::Green);
        assert_eq!(
            colors.tajweed_color(Category::Ghunnah),
            Color::Rgb(255, 126, 30)
        );
    }

    #[test]
    fn test_every_category_has_a_color() {
        let colors = ColorConfig::default();
        for category in Category::ALL {
            assert_ne!(colors.tajweed_color(category), colors.arabic_text);
        }
    }

    #[test]
    fn test_tajweed_color_from_toml() {
        let colors: ColorConfig = toml::from_str("tajweed_qalqalah = \"#0F0\"").unwrap();
        assert_eq!(
            colors.tajweed_color(Category::Qalqalah),
            Color::Rgb(0, 255, 0)
        );
        assert_eq!(colors.status_bg, Color::DarkGray);
    }
}
