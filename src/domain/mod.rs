pub mod address;
pub mod chapter;
pub mod translation;
pub mod verse;

pub use address::{Address, Scheme, VerseKey};
pub use chapter::{Chapter, JuzInfo, TranslatedName};
pub use translation::{filter_resources, group_by_language, plain_text, Tafsir, TranslationResource};
pub use verse::{Glosses, Translation, Verse, Word};
