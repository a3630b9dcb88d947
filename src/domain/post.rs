use std::borrow::Cow;

use chrono::{DateTime, Utc};
use html_escape::decode_html_entities;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A post as returned by the content backend. Read-only once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub uuid: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub plaintext: Option<String>,
    #[serde(default)]
    pub feature_image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub primary_tag: Option<Tag>,
    pub url: String,
    #[serde(default)]
    pub canonical_url: Option<String>,
}

impl Post {
    /// Title with HTML entities decoded.
    pub fn display_title(&self) -> Cow<'_, str> {
        decode_html_entities(&self.title)
    }

    /// Best available plain body: plaintext, then excerpt.
    pub fn display_body(&self) -> Cow<'_, str> {
        self.plaintext
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.excerpt.as_deref())
            .map(decode_html_entities)
            .unwrap_or(Cow::Borrowed(""))
    }

    /// Rendered markup, or a placeholder paragraph when the post has none.
    pub fn html_or_placeholder(&self) -> &str {
        self.html
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("<p>No content.</p>")
    }

    pub fn display_date(&self) -> String {
        self.published_at.format("%-d %B %Y").to_string()
    }

    pub fn has_tag(&self, slug: &str) -> bool {
        self.tags.iter().any(|t| t.slug == slug)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
    pub total: u32,
    #[serde(default)]
    pub next: Option<u32>,
    #[serde(default)]
    pub prev: Option<u32>,
}

/// One page of posts in backend order.
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub pagination: Option<Pagination>,
}

impl FeedPage {
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn next_page(&self) -> Option<u32> {
        self.pagination.as_ref().and_then(|p| p.next)
    }
}
