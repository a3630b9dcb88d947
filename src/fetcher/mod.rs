pub mod http_fetcher;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;

/// Raw backend reply; status interpretation is left to the caller.
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

/// Transport seam between the content client and the network.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &Url, accept_version: Option<&str>) -> Result<FetchResponse>;
}
