pub mod http_fetcher;
pub mod parallel;

use async_trait::async_trait;

use crate::app::Result;

/// Raw upstream response. Status interpretation is left to the caller.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}
