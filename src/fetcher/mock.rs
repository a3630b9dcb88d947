use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::app::{ReaderError, Result};
use crate::fetcher::{FetchResponse, Fetcher};

struct Route {
    needle: String,
    status: u16,
    body: Vec<u8>,
    delay: Option<Duration>,
}

/// In-memory transport: answers by URL substring, counts calls, records URLs.
#[derive(Default)]
pub(crate) struct MockFetcher {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<(Url, Option<String>)>>,
    calls: AtomicUsize,
}

impl MockFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answer any URL containing `needle`. Earlier routes win.
    pub(crate) fn respond(&self, needle: &str, status: u16, body: serde_json::Value) -> &Self {
        self.push(needle, status, body, None)
    }

    pub(crate) fn respond_after(
        &self,
        needle: &str,
        delay: Duration,
        body: serde_json::Value,
    ) -> &Self {
        self.push(needle, 200, body, Some(delay))
    }

    fn push(
        &self,
        needle: &str,
        status: u16,
        body: serde_json::Value,
        delay: Option<Duration>,
    ) -> &Self {
        self.routes.lock().unwrap().push(Route {
            needle: needle.to_string(),
            status,
            body: body.to_string().into_bytes(),
            delay,
        });
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requested_urls(&self) -> Vec<Url> {
        self.requests.lock().unwrap().iter().map(|(u, _)| u.clone()).collect()
    }

    pub(crate) fn last_accept_version(&self) -> Option<String> {
        self.requests.lock().unwrap().last().and_then(|(_, v)| v.clone())
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &Url, accept_version: Option<&str>) -> Result<FetchResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((url.clone(), accept_version.map(String::from)));

        let matched = {
            let routes = self.routes.lock().unwrap();
            routes
                .iter()
                .find(|r| url.as_str().contains(&r.needle))
                .map(|r| (r.status, r.body.clone(), r.delay))
        };

        let (status, body, delay) = matched
            .ok_or_else(|| ReaderError::Backend(format!("connection refused: {}", url.path())))?;

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        Ok(FetchResponse { status, body })
    }
}
