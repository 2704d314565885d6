//! Paginated retrieval against the Quran content API.
//!
//! Every call issues exactly one upstream request. Non-success responses
//! surface as [`TartilError::UpstreamFetch`]; nothing is retried or cached
//! here.

mod query;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::app::{Result, TartilError};
use crate::domain::{Address, Chapter, JuzInfo, Tafsir, TranslationResource, Verse, VerseKey};
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;

pub use query::{SearchQuery, VerseQuery, DEFAULT_LANGUAGE, DEFAULT_PER_PAGE};

pub const DEFAULT_BASE_URL: &str = "https://api.quran.com/api/v4";
pub const DEFAULT_TAFSIR_ID: u32 = 169;

/// One page of verses plus the upstream page count.
#[derive(Debug, Clone, PartialEq)]
pub struct VersePage {
    pub verses: Vec<Verse>,
    pub page: u32,
    pub total_pages: u32,
}

#[derive(Clone)]
pub struct QuranClient {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
    base_url: Url,
}

impl QuranClient {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(TartilError::Config(format!(
                "API base URL cannot carry paths: {}",
                base_url
            )));
        }

        Ok(Self {
            fetcher,
            normalizer: Normalizer::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn verses(&self, address: Address, query: &VerseQuery) -> Result<VersePage> {
        let id = address.id().to_string();
        let mut url = self.endpoint(&["verses", address.scheme().endpoint(), &id])?;
        query.append_to(&mut url);

        let mut body = self
            .get_json("verses", address.to_string(), url)
            .await?;

        let total_pages = total_pages(&body);
        let raw = match take(&mut body, "verses") {
            Some(Value::Array(raw)) => raw,
            _ => {
                return Err(TartilError::MalformedRecord(format!(
                    "verses response for {} has no verses array",
                    address
                )))
            }
        };
        let verses = self.normalizer.normalize_verses(raw, &query.language)?;

        tracing::debug!(
            "Fetched {} verses for {} (page {}/{})",
            verses.len(),
            address,
            query.page,
            total_pages
        );

        Ok(VersePage {
            verses,
            page: query.page,
            total_pages,
        })
    }

    pub async fn verses_by_chapter(&self, chapter_id: u32, query: &VerseQuery) -> Result<VersePage> {
        self.verses(Address::chapter(chapter_id)?, query).await
    }

    pub async fn verses_by_section(&self, juz_id: u32, query: &VerseQuery) -> Result<VersePage> {
        self.verses(Address::section(juz_id)?, query).await
    }

    pub async fn verses_by_page(&self, page_id: u32, query: &VerseQuery) -> Result<VersePage> {
        self.verses(Address::page(page_id)?, query).await
    }

    pub async fn chapters(&self, language: &str) -> Result<Vec<Chapter>> {
        let mut url = self.endpoint(&["chapters"])?;
        url.query_pairs_mut().append_pair("language", language);

        let mut body = self.get_json("chapters", language.to_string(), url).await?;
        decode("chapters", take_list(&mut body, "chapters"))
    }

    /// Translation catalog; `word_by_word` restricts it to word gloss sources.
    pub async fn translation_resources(&self, word_by_word: bool) -> Result<Vec<TranslationResource>> {
        let mut url = self.endpoint(&["resources", "translations"])?;
        if word_by_word {
            url.query_pairs_mut()
                .append_pair("resource_type", "word_by_word");
        }

        let target = if word_by_word { "word_by_word" } else { "all" };
        let mut body = self
            .get_json("translations", target.to_string(), url)
            .await?;
        decode("translations", take_list(&mut body, "translations"))
    }

    pub async fn random_verse(&self, translation_id: u32) -> Result<Verse> {
        let mut url = self.endpoint(&["verses", "random"])?;
        url.query_pairs_mut()
            .append_pair("translations", &translation_id.to_string())
            .append_pair("fields", "text_uthmani");

        let mut body = self
            .get_json("random verse", translation_id.to_string(), url)
            .await?;
        let raw = take(&mut body, "verse").ok_or_else(|| {
            TartilError::MalformedRecord("random verse response has no verse".into())
        })?;
        self.normalizer.normalize_verse(raw, DEFAULT_LANGUAGE)
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Verse>> {
        let mut url = self.endpoint(&["search"])?;
        query.append_to(&mut url);

        let mut body = self.get_json("search", query.text.clone(), url).await?;
        let results = match body
            .get_mut("search")
            .and_then(|s| s.get_mut("results"))
            .map(Value::take)
        {
            Some(Value::Array(results)) => results,
            _ => Vec::new(),
        };

        results
            .into_iter()
            .map(|hit| self.normalizer.normalize_search_hit(hit))
            .collect()
    }

    pub async fn tafsir(&self, verse_key: &VerseKey, tafsir_id: u32) -> Result<Tafsir> {
        let key = verse_key.to_string();
        let url = self.endpoint(&["tafsirs", &tafsir_id.to_string(), "by_ayah", &key])?;

        let mut body = self.get_json("tafsir", key, url).await?;
        let mut tafsir: Tafsir = match take(&mut body, "tafsir") {
            Some(raw) => decode("tafsir", raw)?,
            None => Tafsir::default(),
        };
        if tafsir.resource_id == 0 {
            tafsir.resource_id = tafsir_id;
        }
        Ok(tafsir)
    }

    pub async fn juz(&self, juz_id: u32) -> Result<JuzInfo> {
        let address = Address::section(juz_id)?;
        let url = self.endpoint(&["juzs", &address.id().to_string()])?;

        let mut body = self.get_json("juz", address.to_string(), url).await?;
        let raw = take(&mut body, "juz").ok_or_else(|| {
            TartilError::MalformedRecord(format!("juz response for {} has no juz", juz_id))
        })?;
        decode("juz", raw)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TartilError::Config(format!("Invalid API base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, operation: &'static str, target: String, url: Url) -> Result<Value> {
        tracing::debug!("GET {} ({} {})", url, operation, target);

        let response = self.fetcher.fetch(url.as_str()).await?;
        if !response.is_success() {
            tracing::warn!(
                "Upstream {} for {} failed with HTTP {}",
                operation,
                target,
                response.status
            );
            return Err(TartilError::UpstreamFetch {
                operation,
                target,
                status: response.status,
            });
        }

        serde_json::from_slice(&response.body)
            .map_err(|source| TartilError::Decode { operation, source })
    }
}

/// Page count from `meta.total_pages`, then `pagination.total_pages`, then 1.
/// Zero counts as absent.
pub fn total_pages(body: &Value) -> u32 {
    ["meta", "pagination"]
        .iter()
        .filter_map(|section| body.get(section)?.get("total_pages"))
        .filter_map(as_count)
        .find(|&n| n > 0)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(1)
}

fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn take(body: &mut Value, key: &str) -> Option<Value> {
    body.get_mut(key).map(Value::take).filter(|v| !v.is_null())
}

fn take_list(body: &mut Value, key: &str) -> Value {
    take(body, key).unwrap_or_else(|| Value::Array(Vec::new()))
}

fn decode<T: DeserializeOwned>(operation: &'static str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| TartilError::Decode { operation, source })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::fetcher::FetchResponse;

    /// Serves canned responses by URL path and records requested URLs.
    #[derive(Default)]
    struct ScriptedFetcher {
        routes: HashMap<String, (u16, Value)>,
        requests: Mutex<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn route(mut self, path: &str, status: u16, body: Value) -> Self {
            self.routes.insert(path.to_string(), (status, body));
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for ScriptedFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchResponse> {
            self.requests.lock().unwrap().push(url.to_string());
            let path = Url::parse(url).unwrap().path().to_string();
            let (status, body) = self
                .routes
                .get(&path)
                .cloned()
                .unwrap_or((404, json!({ "status": 404 })));
            Ok(FetchResponse {
                status,
                body: serde_json::to_vec(&body).unwrap(),
            })
        }
    }

    fn client(fetcher: Arc<ScriptedFetcher>) -> QuranClient {
        QuranClient::new(fetcher, "https://api.example.test/api/v4").unwrap()
    }

    fn raw_verse(n: u64) -> Value {
        json!({
            "id": n,
            "verse_key": format!("1:{}", n),
            "text_uthmani": "ٱلْحَمْدُ لِلَّهِ",
            "words": [{ "id": n * 10, "text": "ٱلْحَمْدُ", "translation": { "text": "All praises" } }],
            "translations": [{ "resource_id": 131, "text": "All praise" }]
        })
    }

    #[test]
    fn test_total_pages_prefers_meta() {
        let body = json!({ "meta": { "total_pages": 3 }, "pagination": { "total_pages": 9 } });
        assert_eq!(total_pages(&body), 3);
    }

    #[test]
    fn test_total_pages_falls_back_to_pagination() {
        let body = json!({ "pagination": { "total_pages": 9 } });
        assert_eq!(total_pages(&body), 9);
    }

    #[test]
    fn test_total_pages_defaults_to_one() {
        assert_eq!(total_pages(&json!({})), 1);
        assert_eq!(total_pages(&json!({ "meta": {} })), 1);
        assert_eq!(total_pages(&json!({ "pagination": { "total_pages": null } })), 1);
    }

    #[test]
    fn test_total_pages_zero_counts_as_absent() {
        let body = json!({ "meta": { "total_pages": 0 }, "pagination": { "total_pages": 4 } });
        assert_eq!(total_pages(&body), 4);
    }

    #[tokio::test]
    async fn test_verses_by_chapter_builds_query() {
        let fetcher = Arc::new(ScriptedFetcher::default().route(
            "/api/v4/verses/by_chapter/2",
            200,
            json!({ "verses": [raw_verse(1)], "pagination": { "total_pages": 15 } }),
        ));
        let page = client(fetcher.clone())
            .verses_by_chapter(2, &VerseQuery::new(131).page(3).language("ur"))
            .await
            .unwrap();

        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 15);
        assert_eq!(page.verses[0].words[0].gloss("ur"), Some("All praises"));

        let requests = fetcher.requests();
        assert_eq!(requests.len(), 1);
        let url = Url::parse(&requests[0]).unwrap();
        let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["language"], "ur");
        assert_eq!(pairs["words"], "true");
        assert_eq!(pairs["word_translation_language"], "ur");
        assert_eq!(pairs["word_fields"], "text_uthmani");
        assert_eq!(pairs["translations"], "131");
        assert_eq!(pairs["fields"], "text_uthmani,audio");
        assert_eq!(pairs["per_page"], "20");
        assert_eq!(pairs["page"], "3");
    }

    #[tokio::test]
    async fn test_section_and_page_endpoints() {
        let body = json!({ "verses": [raw_verse(1)], "meta": { "total_pages": 2 } });
        let fetcher = Arc::new(
            ScriptedFetcher::default()
                .route("/api/v4/verses/by_juz/5", 200, body.clone())
                .route("/api/v4/verses/by_page/10", 200, body),
        );
        let client = client(fetcher.clone());
        let query = VerseQuery::new(131);

        assert_eq!(client.verses_by_section(5, &query).await.unwrap().total_pages, 2);
        assert_eq!(client.verses_by_page(10, &query).await.unwrap().total_pages, 2);
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_address_is_rejected_before_fetch() {
        let fetcher = Arc::new(ScriptedFetcher::default());
        let err = client(fetcher.clone())
            .verses_by_page(605, &VerseQuery::new(131))
            .await
            .unwrap_err();

        assert!(matches!(err, TartilError::InvalidAddress { .. }));
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_typed_failure() {
        let fetcher = Arc::new(ScriptedFetcher::default().route(
            "/api/v4/verses/by_chapter/1",
            503,
            json!({ "error": "unavailable" }),
        ));
        let err = client(fetcher)
            .verses_by_chapter(1, &VerseQuery::new(131))
            .await
            .unwrap_err();

        match err {
            TartilError::UpstreamFetch {
                operation,
                target,
                status,
            } => {
                assert_eq!(operation, "verses");
                assert_eq!(target, "chapter 1");
                assert_eq!(status, 503);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_verses_array_is_malformed() {
        let fetcher = Arc::new(ScriptedFetcher::default().route(
            "/api/v4/verses/by_chapter/1",
            200,
            json!({ "meta": {} }),
        ));
        let err = client(fetcher)
            .verses_by_chapter(1, &VerseQuery::new(131))
            .await
            .unwrap_err();
        assert!(matches!(err, TartilError::MalformedRecord(_)));
    }

    #[tokio::test]
    async fn test_chapters_catalog() {
        let fetcher = Arc::new(ScriptedFetcher::default().route(
            "/api/v4/chapters",
            200,
            json!({ "chapters": [
                { "id": 1, "name_simple": "Al-Fatihah", "name_arabic": "الفاتحة", "revelation_place": "makkah", "verses_count": 7 },
                { "id": 2, "name_simple": "Al-Baqarah", "name_arabic": "البقرة", "revelation_place": "madinah", "verses_count": 286 }
            ] }),
        ));
        let chapters = client(fetcher.clone()).chapters("en").await.unwrap();

        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[1].name_simple, "Al-Baqarah");
        assert_eq!(chapters[1].verses_count, Some(286));
        assert!(fetcher.requests()[0].ends_with("/chapters?language=en"));
    }

    #[tokio::test]
    async fn test_word_by_word_translation_filter() {
        let fetcher = Arc::new(ScriptedFetcher::default().route(
            "/api/v4/resources/translations",
            200,
            json!({ "translations": [{ "id": 131, "name": "Dr. Mustafa Khattab", "language_name": "english" }] }),
        ));
        let client = client(fetcher.clone());

        client.translation_resources(false).await.unwrap();
        let resources = client.translation_resources(true).await.unwrap();

        assert_eq!(resources[0].id, 131);
        let requests = fetcher.requests();
        assert!(!requests[0].contains("resource_type"));
        assert!(requests[1].ends_with("resource_type=word_by_word"));
    }

    #[tokio::test]
    async fn test_search_maps_hits_without_words() {
        let fetcher = Arc::new(ScriptedFetcher::default().route(
            "/api/v4/search",
            200,
            json!({ "search": { "query": "mercy", "total_results": 1, "results": [
                { "verse_key": "1:3", "verse_id": 3, "text": "ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ", "translations": [{ "resource_id": 20, "text": "The Most Merciful" }] }
            ] } }),
        ));
        let verses = client(fetcher.clone())
            .search(&SearchQuery::new("mercy"))
            .await
            .unwrap();

        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].verse_key, "1:3");
        assert!(verses[0].words.is_empty());

        let url = Url::parse(&fetcher.requests()[0]).unwrap();
        let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["q"], "mercy");
        assert_eq!(pairs["size"], "20");
        assert_eq!(pairs["translations"], "20");
    }

    #[test]
    fn test_search_without_results_is_empty() {
        let fetcher = Arc::new(ScriptedFetcher::default().route("/api/v4/search", 200, json!({})));
        let client = client(fetcher);
        let verses = tokio_test::block_on(client.search(&SearchQuery::new("nothing"))).unwrap();
        assert!(verses.is_empty());
    }

    #[tokio::test]
    async fn test_tafsir_uses_requested_resource() {
        let fetcher = Arc::new(ScriptedFetcher::default().route(
            "/api/v4/tafsirs/169/by_ayah/2:255",
            200,
            json!({ "tafsir": { "text": "<p>Ayat al-Kursi</p>" } }),
        ));
        let key: VerseKey = "2:255".parse().unwrap();
        let tafsir = client(fetcher)
            .tafsir(&key, DEFAULT_TAFSIR_ID)
            .await
            .unwrap();

        assert_eq!(tafsir.resource_id, 169);
        assert_eq!(tafsir.text, "<p>Ayat al-Kursi</p>");
    }

    #[tokio::test]
    async fn test_random_verse() {
        let fetcher = Arc::new(ScriptedFetcher::default().route(
            "/api/v4/verses/random",
            200,
            json!({ "verse": raw_verse(4) }),
        ));
        let verse = client(fetcher.clone()).random_verse(131).await.unwrap();

        assert_eq!(verse.verse_key, "1:4");
        assert!(fetcher.requests()[0].contains("translations=131"));
    }

    #[tokio::test]
    async fn test_juz_metadata() {
        let fetcher = Arc::new(ScriptedFetcher::default().route(
            "/api/v4/juzs/30",
            200,
            json!({ "juz": { "id": 30, "juz_number": 30, "verse_mapping": { "78": "1-40", "114": "1-6" }, "first_verse_id": 5673, "last_verse_id": 6236, "verses_count": 564 } }),
        ));
        let juz = client(fetcher).juz(30).await.unwrap();

        assert_eq!(juz.juz_number, 30);
        assert_eq!(juz.verse_mapping["78"], "1-40");
        assert_eq!(juz.verses_count, Some(564));
    }

    #[test]
    fn test_rejects_non_base_url() {
        let fetcher = Arc::new(ScriptedFetcher::default());
        assert!(QuranClient::new(fetcher, "mailto:someone@example.com").is_err());
    }
}
