use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Request};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::app::{ReaderError, Result};
use crate::config::PushConfig;

const TOKENS_TABLE: &str = "push_tokens";

/// Backing store for push registration tokens.
#[async_trait]
pub trait PushTokenStore: Send + Sync {
    /// Insert or refresh `token`.
    async fn register(&self, token: &str) -> Result<()>;
    /// Mark `token` inactive.
    async fn unregister(&self, token: &str) -> Result<()>;
}

/// Stores tokens in a Supabase `push_tokens` table through its REST API.
pub struct SupabaseTokenStore {
    client: Client,
    base_url: Url,
    anon_key: String,
    platform: String,
}

impl SupabaseTokenStore {
    pub fn new(config: &PushConfig) -> Result<Self> {
        if !config.is_configured() {
            return Err(ReaderError::Config(
                "Push token storage needs SUPABASE_URL and SUPABASE_ANON_KEY".into(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("mattelevizion/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(config.supabase_url.trim())?,
            anon_key: config.supabase_anon_key.trim().to_string(),
            platform: config.platform.clone(),
        })
    }

    fn table_url(&self) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ReaderError::Config(format!("Invalid Supabase URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["rest", "v1", TOKENS_TABLE]);
        Ok(url)
    }

    /// Upsert keyed on the token column.
    pub(crate) fn register_request(&self, token: &str) -> Result<Request> {
        let mut url = self.table_url()?;
        url.query_pairs_mut().append_pair("on_conflict", "token");

        let body = json!({
            "token": token,
            "platform": self.platform,
            "updated_at": Utc::now().to_rfc3339(),
        });

        self.request(Method::POST, url, &body, "resolution=merge-duplicates,return=minimal")
    }

    pub(crate) fn unregister_request(&self, token: &str) -> Result<Request> {
        let mut url = self.table_url()?;
        url.query_pairs_mut()
            .append_pair("token", &format!("eq.{}", token));

        self.request(Method::PATCH, url, &json!({ "active": false }), "return=minimal")
    }

    fn request(
        &self,
        method: Method,
        url: Url,
        body: &serde_json::Value,
        prefer: &'static str,
    ) -> Result<Request> {
        let request = self
            .client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header("prefer", HeaderValue::from_static(prefer))
            .body(serde_json::to_vec(body)?)
            .build()?;
        Ok(request)
    }

    async fn execute(&self, request: Request) -> Result<()> {
        debug!(method = %request.method(), path = request.url().path(), "Push token request");
        let response = self.client.execute(request).await?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        Err(ReaderError::Backend(message))
    }
}

#[async_trait]
impl PushTokenStore for SupabaseTokenStore {
    async fn register(&self, token: &str) -> Result<()> {
        let request = self.register_request(token)?;
        self.execute(request).await
    }

    async fn unregister(&self, token: &str) -> Result<()> {
        let request = self.unregister_request(token)?;
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SupabaseTokenStore {
        SupabaseTokenStore::new(&PushConfig {
            supabase_url: "https://db.example.com".into(),
            supabase_anon_key: "anon".into(),
            platform: "expo".into(),
        })
        .unwrap()
    }

    fn body_json(request: &Request) -> serde_json::Value {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_requires_configuration() {
        assert!(matches!(
            SupabaseTokenStore::new(&PushConfig::default()),
            Err(ReaderError::Config(_))
        ));
    }

    #[test]
    fn test_register_request_upserts_on_token() {
        let request = store().register_request("ExponentPushToken[abc]").unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().path(), "/rest/v1/push_tokens");
        assert_eq!(request.url().query(), Some("on_conflict=token"));
        assert_eq!(request.headers()["apikey"], "anon");
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer anon");
        assert!(request.headers()["prefer"]
            .to_str()
            .unwrap()
            .contains("merge-duplicates"));

        let body = body_json(&request);
        assert_eq!(body["token"], "ExponentPushToken[abc]");
        assert_eq!(body["platform"], "expo");
        assert!(body["updated_at"].is_string());
    }

    #[test]
    fn test_unregister_request_marks_inactive() {
        let request = store().unregister_request("tok").unwrap();

        assert_eq!(request.method(), Method::PATCH);
        assert_eq!(request.url().query(), Some("token=eq.tok"));
        assert_eq!(body_json(&request), json!({ "active": false }));
    }
}
