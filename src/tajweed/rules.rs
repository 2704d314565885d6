//! Recitation-rule table.
//!
//! Each rule recognises a short run of letters and marks starting at the
//! current scan position. [`RULES`] is ordered: when two rules match the same
//! number of characters the earlier one wins.

use std::fmt;

pub const NOON: char = '\u{0646}';
pub const MEEM: char = '\u{0645}';
pub const ALEF_WITH_MADDA: char = '\u{0622}';
pub const ALEF_WASLA: char = '\u{0671}';
pub const TATWEEL: char = '\u{0640}';

pub const FATHATAN: char = '\u{064B}';
pub const DAMMATAN: char = '\u{064C}';
pub const KASRATAN: char = '\u{064D}';
pub const FATHA: char = '\u{064E}';
pub const DAMMA: char = '\u{064F}';
pub const KASRA: char = '\u{0650}';
pub const SHADDA: char = '\u{0651}';
pub const SUKUN: char = '\u{0652}';
pub const MADDAH: char = '\u{0653}';
pub const SUPERSCRIPT_ALEF: char = '\u{0670}';
pub const SMALL_HIGH_ROUNDED_ZERO: char = '\u{06DF}';
pub const SMALL_HIGH_UPRIGHT_ZERO: char = '\u{06E0}';
pub const QURANIC_SUKUN: char = '\u{06E1}';
pub const SMALL_HIGH_MEEM: char = '\u{06E2}';
pub const SMALL_LOW_MEEM: char = '\u{06ED}';
pub const OPEN_FATHATAN: char = '\u{08F0}';
pub const OPEN_DAMMATAN: char = '\u{08F1}';
pub const OPEN_KASRATAN: char = '\u{08F2}';

const QALQALAH_LETTERS: [char; 5] = ['\u{0642}', '\u{0637}', '\u{0628}', '\u{062C}', '\u{062F}'];

/// Longest window any rule inspects.
pub const MAX_RULE_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ghunnah,
    Iqlab,
    Madd,
    Qalqalah,
    HamWasl,
    Silent,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Ghunnah,
        Category::Iqlab,
        Category::Madd,
        Category::Qalqalah,
        Category::HamWasl,
        Category::Silent,
    ];

    /// Class name written into the markup.
    pub fn class(self) -> &'static str {
        match self {
            Category::Ghunnah => "ghunnah",
            Category::Iqlab => "iqlab",
            Category::Madd => "madd",
            Category::Qalqalah => "qalqalah",
            Category::HamWasl => "ham_wasl",
            Category::Silent => "silent",
        }
    }

    pub fn from_class(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.class() == class)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class())
    }
}

/// A matcher returns how many characters of `window` it claims, 0 for no match.
pub type Matcher = fn(&[char]) -> usize;

#[derive(Clone, Copy)]
pub struct Rule {
    pub category: Category,
    pub matcher: Matcher,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("category", &self.category)
            .finish()
    }
}

pub const RULES: [Rule; 6] = [
    Rule {
        category: Category::Ghunnah,
        matcher: match_ghunnah,
    },
    Rule {
        category: Category::Iqlab,
        matcher: match_iqlab,
    },
    Rule {
        category: Category::Madd,
        matcher: match_madd,
    },
    Rule {
        category: Category::Qalqalah,
        matcher: match_qalqalah,
    },
    Rule {
        category: Category::HamWasl,
        matcher: match_ham_wasl,
    },
    Rule {
        category: Category::Silent,
        matcher: match_silent,
    },
];

pub fn is_letter(c: char) -> bool {
    matches!(c, '\u{0621}'..='\u{063A}' | '\u{0641}'..='\u{064A}' | '\u{0671}'..='\u{06D3}')
        || c == TATWEEL
}

pub fn is_vowel(c: char) -> bool {
    matches!(c, FATHA | DAMMA | KASRA)
}

pub fn is_tanween(c: char) -> bool {
    matches!(
        c,
        FATHATAN | DAMMATAN | KASRATAN | OPEN_FATHATAN | OPEN_DAMMATAN | OPEN_KASRATAN
    )
}

fn is_sukun(c: char) -> bool {
    matches!(c, SUKUN | QURANIC_SUKUN)
}

fn is_small_meem(c: char) -> bool {
    matches!(c, SMALL_HIGH_MEEM | SMALL_LOW_MEEM)
}

fn at(window: &[char], i: usize) -> Option<char> {
    window.get(i).copied()
}

/// Noon or meem with shadda, the vowel written before or after the shadda.
fn match_ghunnah(w: &[char]) -> usize {
    if !matches!(at(w, 0), Some(NOON | MEEM)) {
        return 0;
    }
    match (at(w, 1), at(w, 2)) {
        (Some(SHADDA), Some(v)) if is_vowel(v) => 3,
        (Some(SHADDA), _) => 2,
        (Some(v), Some(SHADDA)) if is_vowel(v) => 3,
        _ => 0,
    }
}

/// Noon sakinah or tanween turned into meem, marked by a small meem.
fn match_iqlab(w: &[char]) -> usize {
    if at(w, 0) == Some(NOON) {
        let i = if at(w, 1).is_some_and(is_sukun) { 2 } else { 1 };
        if at(w, i).is_some_and(is_small_meem) {
            return i + 1;
        }
    }

    let start = usize::from(at(w, 0).is_some_and(is_letter));
    match (at(w, start), at(w, start + 1)) {
        (Some(t), Some(m)) if (is_tanween(t) || is_vowel(t)) && is_small_meem(m) => start + 2,
        _ => 0,
    }
}

/// A letter carrying the maddah sign, or the precomposed alef with madda.
fn match_madd(w: &[char]) -> usize {
    match at(w, 0) {
        Some(ALEF_WITH_MADDA) => {
            if at(w, 1) == Some(MADDAH) {
                2
            } else {
                1
            }
        }
        Some(c) if is_letter(c) => {
            let mut i = 1;
            if at(w, i) == Some(SHADDA) {
                i += 1;
            }
            if at(w, i).is_some_and(|c| is_vowel(c) || c == SUPERSCRIPT_ALEF) {
                i += 1;
            }
            if at(w, i) == Some(MADDAH) {
                i + 1
            } else {
                0
            }
        }
        _ => 0,
    }
}

/// One of qaf, ta, ba, jeem, dal with sukun.
fn match_qalqalah(w: &[char]) -> usize {
    match (at(w, 0), at(w, 1)) {
        (Some(c), Some(s)) if QALQALAH_LETTERS.contains(&c) && is_sukun(s) => 2,
        _ => 0,
    }
}

fn match_ham_wasl(w: &[char]) -> usize {
    usize::from(at(w, 0) == Some(ALEF_WASLA))
}

/// A letter written but not pronounced.
fn match_silent(w: &[char]) -> usize {
    match (at(w, 0), at(w, 1)) {
        (Some(c), Some(SMALL_HIGH_ROUNDED_ZERO | SMALL_HIGH_UPRIGHT_ZERO)) if is_letter(c) => 2,
        _ => 0,
    }
}
