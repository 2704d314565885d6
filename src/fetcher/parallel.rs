use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::try_join_all;
use tokio::sync::Semaphore;

use crate::app::{Result, TartilError};
use crate::client::{QuranClient, VerseQuery};
use crate::domain::{Address, Verse};

pub const DEFAULT_WORKERS: usize = 4;

/// Fetches every page of one address with bounded concurrency.
///
/// Page 1 is fetched first to learn the page count; the remaining pages are
/// requested concurrently and reassembled in page order.
pub struct ParallelFetcher {
    client: QuranClient,
    semaphore: Arc<Semaphore>,
}

impl ParallelFetcher {
    pub fn new(client: QuranClient) -> Self {
        Self::with_workers(client, DEFAULT_WORKERS)
    }

    pub fn with_workers(client: QuranClient, workers: usize) -> Self {
        Self {
            client,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    pub async fn fetch_all(&self, address: Address, query: &VerseQuery) -> Result<Vec<Verse>> {
        let first = self
            .client
            .verses(address, &query.clone().page(1))
            .await?;
        let total_pages = first.total_pages;

        let mut pages: BTreeMap<u32, Vec<Verse>> = BTreeMap::new();
        pages.insert(1, first.verses);

        // Dropping the joined futures on the first error cancels pages still in flight.
        let requests = (2..=total_pages).map(|page| {
            let query = query.clone().page(page);
            async move {
                let _permit = self
                    .semaphore
                    .acquire()
                    .await
                    .map_err(|e| TartilError::Other(format!("Worker pool closed: {}", e)))?;
                let verse_page = self.client.verses(address, &query).await?;
                Ok::<_, TartilError>((page, verse_page.verses))
            }
        });

        for (page, verses) in try_join_all(requests).await? {
            pages.entry(page).or_insert(verses);
        }

        let verses: Vec<Verse> = pages.into_values().flatten().collect();
        tracing::info!(
            "Collected {} verses across {} pages for {}",
            verses.len(),
            total_pages,
            address
        );

        Ok(verses)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;
    use url::Url;

    use super::*;
    use crate::fetcher::{FetchResponse, Fetcher};

    /// Pages of two verses each; later pages answer faster than earlier ones.
    struct PagedFetcher {
        calls: AtomicUsize,
        pages: u32,
        fail_page: Option<u32>,
    }

    #[async_trait]
    impl Fetcher for PagedFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let url = Url::parse(url).unwrap();
            let page: u32 = url
                .query_pairs()
                .find(|(k, _)| k == "page")
                .and_then(|(_, v)| v.parse().ok())
                .unwrap();

            tokio::time::sleep(Duration::from_millis(u64::from(10 * (self.pages + 1 - page)))).await;

            if Some(page) == self.fail_page {
                return Ok(FetchResponse {
                    status: 500,
                    body: Vec::new(),
                });
            }

            let first = u64::from((page - 1) * 2 + 1);
            let body = json!({
                "verses": [
                    { "id": first, "verse_key": format!("2:{}", first) },
                    { "id": first + 1, "verse_key": format!("2:{}", first + 1) }
                ],
                "pagination": { "total_pages": self.pages }
            });
            Ok(FetchResponse {
                status: 200,
                body: serde_json::to_vec(&body).unwrap(),
            })
        }
    }

    fn collector(
        pages: u32,
        fail_page: Option<u32>,
        workers: usize,
    ) -> (ParallelFetcher, Arc<PagedFetcher>) {
        let fetcher = Arc::new(PagedFetcher {
            calls: AtomicUsize::new(0),
            pages,
            fail_page,
        });
        let client = QuranClient::new(fetcher.clone(), "https://api.example.test/api/v4").unwrap();
        (ParallelFetcher::with_workers(client, workers), fetcher)
    }

    #[tokio::test]
    async fn test_pages_reassembled_in_order() {
        let (collector, fetcher) = collector(3, None, 2);
        let verses = collector
            .fetch_all(Address::chapter(2).unwrap(), &VerseQuery::new(131))
            .await
            .unwrap();

        let ids: Vec<u64> = verses.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failing_page_fails_collection() {
        let (collector, _) = collector(3, Some(3), 2);
        let err = collector
            .fetch_all(Address::chapter(2).unwrap(), &VerseQuery::new(131))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_no_requests_after_failed_collection() {
        let (collector, fetcher) = collector(10, Some(2), 1);
        let err = collector
            .fetch_all(Address::section(1).unwrap(), &VerseQuery::new(131))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));

        // Page 1, then page 2 holding the only permit.
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }
}
