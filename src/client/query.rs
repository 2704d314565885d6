use url::Url;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_PER_PAGE: u32 = 20;
pub const DEFAULT_SEARCH_SIZE: u32 = 20;
pub const DEFAULT_SEARCH_TRANSLATION: u32 = 20;

/// Parameters shared by the three verse listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseQuery {
    pub translation_id: u32,
    pub page: u32,
    pub per_page: u32,
    /// Language for word glosses and upstream labels.
    pub language: String,
}

impl VerseQuery {
    pub fn new(translation_id: u32) -> Self {
        Self {
            translation_id,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub(crate) fn append_to(&self, url: &mut Url) {
        url.query_pairs_mut()
            .append_pair("language", &self.language)
            .append_pair("words", "true")
            .append_pair("word_translation_language", &self.language)
            .append_pair("word_fields", "text_uthmani")
            .append_pair("translations", &self.translation_id.to_string())
            .append_pair("fields", "text_uthmani,audio")
            .append_pair("per_page", &self.per_page.to_string())
            .append_pair("page", &self.page.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub size: u32,
    pub translation_id: u32,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: DEFAULT_SEARCH_SIZE,
            translation_id: DEFAULT_SEARCH_TRANSLATION,
        }
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = size.max(1);
        self
    }

    pub fn translation(mut self, translation_id: u32) -> Self {
        self.translation_id = translation_id;
        self
    }

    pub(crate) fn append_to(&self, url: &mut Url) {
        url.query_pairs_mut()
            .append_pair("q", &self.text)
            .append_pair("size", &self.size.to_string())
            .append_pair("translations", &self.translation_id.to_string());
    }
}
