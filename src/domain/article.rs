use std::fmt;

use serde::Serialize;

/// Canonical "open this article" instruction.
///
/// The slug is guaranteed non-empty and safe to drop into a single path
/// segment: no `/`, query or fragment markers, whitespace or control
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ArticleRef {
    slug: String,
}

impl ArticleRef {
    pub fn new(slug: impl Into<String>) -> Option<Self> {
        let slug = slug.into();
        if Self::is_valid_slug(&slug) {
            Some(Self { slug })
        } else {
            None
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn into_slug(self) -> String {
        self.slug
    }

    /// In-app route for the article screen.
    pub fn route(&self) -> String {
        format!("/article/{}", self.slug)
    }

    fn is_valid_slug(slug: &str) -> bool {
        !slug.is_empty()
            && !slug
                .chars()
                .any(|c| matches!(c, '/' | '?' | '#') || c.is_whitespace() || c.is_control())
    }
}

impl fmt::Display for ArticleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slug)
    }
}
