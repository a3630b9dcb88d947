pub const DEFAULT_LIMIT: u32 = 10;

/// One feed request: how many posts, which page, optionally scoped to a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    limit: u32,
    tag: Option<String>,
    page: Option<u32>,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            tag: None,
            page: None,
        }
    }
}

impl FeedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero is bumped to one; the backend needs a positive limit.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn with_tag(self, tag: impl Into<String>) -> Self {
        self.with_optional_tag(Some(tag.into()))
    }

    /// Empty slugs clear the filter.
    pub fn with_optional_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = (page >= 1).then_some(page);
        self
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn page(&self) -> Option<u32> {
        self.page
    }

    /// Backend filter expression; always a single tag.
    pub fn filter(&self) -> Option<String> {
        self.tag.as_ref().map(|tag| format!("tag:{}", tag.trim()))
    }
}
