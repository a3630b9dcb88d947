/// Immutable backend settings shared by the content client and link resolver.
///
/// Built once at startup and handed around behind an `Arc`; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_version: String,
}

impl ClientConfig {
    pub fn new(base_url: &str, api_key: &str, api_version: &str) -> Self {
        Self {
            base_url: base_url.trim().to_string(),
            api_key: api_key.trim().to_string(),
            api_version: api_version.trim().to_string(),
        }
    }

    /// True iff both the base URL and the API key are set.
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.api_key.is_empty()
    }
}
