use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use url::Url;

use crate::app::Result;
use crate::fetcher::{FetchResponse, Fetcher};

const ACCEPT_VERSION: &str = "accept-version";

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(10))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("mattelevizion/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, accept_version: Option<&str>) -> Result<FetchResponse> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(version) = accept_version.filter(|v| !v.is_empty()) {
            if let Ok(value) = HeaderValue::from_str(version) {
                headers.insert(ACCEPT_VERSION, value);
            }
        }

        let response = self.client.get(url.clone()).headers(headers).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(FetchResponse { status, body })
    }
}
