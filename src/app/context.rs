use std::sync::Arc;

use crate::app::error::Result;
use crate::client::{QuranClient, VerseQuery};
use crate::config::{Config, ReadingConfig};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::parallel::ParallelFetcher;
use crate::fetcher::Fetcher;

pub struct AppContext {
    pub client: QuranClient,
    pub parallel_fetcher: ParallelFetcher,
    pub reading: ReadingConfig,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.api)?);
        Self::with_fetcher(fetcher, config)
    }

    /// Context over any transport; tests pass scripted fetchers here.
    pub fn with_fetcher(fetcher: Arc<dyn Fetcher + Send + Sync>, config: &Config) -> Result<Self> {
        let client = QuranClient::new(fetcher, &config.api.base_url)?;
        let parallel_fetcher = ParallelFetcher::with_workers(client.clone(), config.reading.workers);

        tracing::debug!(
            "Using {} with {} workers",
            client.base_url(),
            config.reading.workers
        );

        Ok(Self {
            client,
            parallel_fetcher,
            reading: config.reading.clone(),
        })
    }

    /// Verse query seeded from the `[reading]` section.
    pub fn verse_query(&self) -> VerseQuery {
        VerseQuery::new(self.reading.translation_id)
            .per_page(self.reading.per_page)
            .language(self.reading.word_language.clone())
    }
}
