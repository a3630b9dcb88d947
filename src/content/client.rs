use std::borrow::Cow;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::app::{ReaderError, Result};
use crate::config::ClientConfig;
use crate::domain::{ArticleRef, FeedPage, FeedQuery, Pagination, Post};
use crate::fetcher::{FetchResponse, Fetcher};

const API_PATH: [&str; 3] = ["ghost", "api", "content"];
const POSTS_INCLUDE: &str = "tags";
const POST_FORMATS: &str = "html,plaintext";

#[derive(Debug, Deserialize)]
struct PostsEnvelope {
    #[serde(default)]
    posts: Vec<Post>,
    #[serde(default)]
    meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Read-only client for posts on the configured Ghost site.
///
/// When the site URL or key is missing the client is disabled: every
/// operation fails with [`ReaderError::NotConfigured`] before touching the
/// network.
pub struct ContentClient {
    config: Arc<ClientConfig>,
    fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl ContentClient {
    pub fn new(config: Arc<ClientConfig>, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self { config, fetcher }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch one page of posts, optionally scoped to a single tag.
    pub async fn list_posts(&self, query: &FeedQuery) -> Result<FeedPage> {
        self.ensure_configured()?;

        let mut url = self.endpoint(&["posts"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("key", &self.config.api_key)
                .append_pair("limit", &query.limit().to_string())
                .append_pair("include", POSTS_INCLUDE);
            if let Some(page) = query.page() {
                pairs.append_pair("page", &page.to_string());
            }
            if let Some(filter) = query.filter() {
                pairs.append_pair("filter", &filter);
            }
        }

        debug!(path = url.path(), tag = ?query.tag(), limit = query.limit(), "Listing posts");
        let response = self.send(&url).await?;

        if !response.is_success() {
            return Err(backend_error(&response));
        }

        let envelope: PostsEnvelope = serde_json::from_slice(&response.body)?;
        Ok(FeedPage {
            posts: envelope.posts,
            pagination: envelope.meta.and_then(|m| m.pagination),
        })
    }

    /// Fetch a single post with rendered markup and plain text.
    ///
    /// An empty slug is a missing article and never reaches the backend.
    pub async fn get_post(&self, slug: &str) -> Result<Post> {
        if slug.is_empty() {
            return Err(ReaderError::MissingArticle);
        }
        self.ensure_configured()?;

        // Link slugs arrive percent-encoded and `extend` encodes again.
        let segment = urlencoding::decode(slug).unwrap_or(Cow::Borrowed(slug));
        let mut url = self.endpoint(&["posts", "slug", &*segment])?;
        url.query_pairs_mut()
            .append_pair("key", &self.config.api_key)
            .append_pair("include", POSTS_INCLUDE)
            .append_pair("formats", POST_FORMATS);

        debug!(path = url.path(), "Reading post");
        let response = self.send(&url).await?;

        if response.status == 404 {
            return Err(ReaderError::NotFound(slug.to_string()));
        }
        if !response.is_success() {
            return Err(backend_error(&response));
        }

        let envelope: PostsEnvelope = serde_json::from_slice(&response.body)?;
        envelope
            .posts
            .into_iter()
            .next()
            .ok_or_else(|| ReaderError::NotFound(slug.to_string()))
    }

    pub async fn get_article(&self, article: &ArticleRef) -> Result<Post> {
        self.get_post(article.slug()).await
    }

    /// Latest posts other than `exclude_slug`, at most `count` of them.
    pub async fn recent_posts(&self, exclude_slug: &str, count: usize) -> Result<Vec<Post>> {
        let limit = u32::try_from(count.saturating_add(1)).unwrap_or(u32::MAX);
        let page = self.list_posts(&FeedQuery::new().with_limit(limit)).await?;

        Ok(page
            .posts
            .into_iter()
            .filter(|p| p.slug != exclude_slug)
            .take(count)
            .collect())
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ReaderError::NotConfigured)
        }
    }

    fn endpoint(&self, resource: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)?;
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| {
                ReaderError::Config(format!("Site URL cannot hold a path: {}", self.config.base_url))
            })?
            .pop_if_empty()
            .extend(API_PATH)
            .extend(resource)
            .push("");
        Ok(url)
    }

    async fn send(&self, url: &Url) -> Result<FetchResponse> {
        let version = Some(self.config.api_version.as_str()).filter(|v| !v.is_empty());
        self.fetcher.fetch(url, version).await
    }
}

fn backend_error(response: &FetchResponse) -> ReaderError {
    let message = serde_json::from_slice::<ErrorEnvelope>(&response.body)
        .ok()
        .and_then(|e| e.errors.into_iter().next())
        .map(|e| e.message)
        .unwrap_or_else(|| format!("HTTP {}", response.status));
    ReaderError::Backend(message)
}
