//! Turns incoming URLs into article references.
//!
//! Two link shapes are recognised:
//!
//! - App links: `mattelevizion://article/<slug>`. Here `article` parses as
//!   the URL host, so the slug is the *first* path segment.
//! - Site links: `https://<site-host>/<slug>/`, `/posts/<slug>/` or
//!   `/p/<slug>/`. The slug is the *last* path segment.
//!
//! Anything else, including unparseable input, is simply not an article.

use url::Url;

use crate::config::ClientConfig;
use crate::domain::ArticleRef;

pub const APP_SCHEME: &str = "mattelevizion";

/// Listing prefixes that are never slugs on their own.
const RESERVED_SEGMENTS: [&str; 2] = ["posts", "p"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct SiteHost {
    host: String,
    port: Option<u16>,
}

#[derive(Debug, Clone)]
pub struct LinkResolver {
    scheme: String,
    site: Option<SiteHost>,
}

impl LinkResolver {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_scheme(config, APP_SCHEME)
    }

    /// Only the site URL matters here; a missing API key does not stop
    /// site links from resolving.
    pub fn with_scheme(config: &ClientConfig, scheme: &str) -> Self {
        let site = Url::parse(&config.base_url).ok().and_then(|url| {
            url.host_str().map(|host| SiteHost {
                host: host.to_string(),
                port: url.port(),
            })
        });

        Self {
            scheme: scheme.to_ascii_lowercase(),
            site,
        }
    }

    pub fn resolve(&self, input: &str) -> Option<ArticleRef> {
        let url = Url::parse(input.trim()).ok()?;

        if url.scheme() == self.scheme {
            let segments = path_segments(&url);
            let slug = segments.first().or(segments.last())?;
            return ArticleRef::new(*slug);
        }

        if url.scheme() == "https" && self.is_site(&url) {
            let segments = path_segments(&url);
            let slug = segments.last().or(segments.first())?;
            if RESERVED_SEGMENTS.contains(slug) {
                return None;
            }
            return ArticleRef::new(*slug);
        }

        None
    }

    pub fn resolve_opt(&self, input: Option<&str>) -> Option<ArticleRef> {
        input.and_then(|s| self.resolve(s))
    }

    fn is_site(&self, url: &Url) -> bool {
        self.site
            .as_ref()
            .is_some_and(|site| url.host_str() == Some(site.host.as_str()) && url.port() == site.port)
    }
}

fn path_segments(url: &Url) -> Vec<&str> {
    url.path()
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> LinkResolver {
        LinkResolver::new(&ClientConfig::new("https://your-ghost-site.com", "", "v6.0"))
    }

    fn slug(input: &str) -> Option<String> {
        resolver().resolve(input).map(ArticleRef::into_slug)
    }

    #[test]
    fn test_app_link() {
        assert_eq!(slug("mattelevizion://article/my-article").as_deref(), Some("my-article"));
        assert_eq!(slug("mattelevizion://article/my-article/").as_deref(), Some("my-article"));
    }

    #[test]
    fn test_app_link_takes_first_segment() {
        assert_eq!(slug("mattelevizion://article/first/second").as_deref(), Some("first"));
    }

    #[test]
    fn test_app_link_without_slug() {
        assert_eq!(slug("mattelevizion://article"), None);
        assert_eq!(slug("mattelevizion://article/"), None);
    }

    #[test]
    fn test_app_link_segment_is_not_validated() {
        assert_eq!(slug("mattelevizion://article/posts").as_deref(), Some("posts"));
        assert_eq!(slug("mattelevizion://article/a\\b").as_deref(), Some("a\\b"));
    }

    #[test]
    fn test_site_links() {
        assert_eq!(slug("https://your-ghost-site.com/my-article/").as_deref(), Some("my-article"));
        assert_eq!(slug("https://your-ghost-site.com/posts/my-article/").as_deref(), Some("my-article"));
        assert_eq!(slug("https://your-ghost-site.com/p/my-article").as_deref(), Some("my-article"));
        assert_eq!(
            slug("https://your-ghost-site.com/my-article/?utm_source=facebook#top").as_deref(),
            Some("my-article")
        );
    }

    #[test]
    fn test_site_link_takes_last_segment() {
        assert_eq!(slug("https://your-ghost-site.com/2024/01/my-article/").as_deref(), Some("my-article"));
    }

    #[test]
    fn test_listing_paths_are_not_articles() {
        assert_eq!(slug("https://your-ghost-site.com/posts/"), None);
        assert_eq!(slug("https://your-ghost-site.com/p/"), None);
        assert_eq!(slug("https://your-ghost-site.com/"), None);
    }

    #[test]
    fn test_other_hosts_and_schemes() {
        assert_eq!(slug("https://example.com/posts/my-article/"), None);
        assert_eq!(slug("http://your-ghost-site.com/my-article/"), None);
        assert_eq!(slug("https://your-ghost-site.com:8443/my-article/"), None);
        assert_eq!(slug("ftp://your-ghost-site.com/my-article"), None);
    }

    #[test]
    fn test_malformed_input() {
        for input in ["", "   ", "not a url", "://", "https://", "mattelevizion", "%%%"] {
            assert_eq!(slug(input), None, "input {:?}", input);
        }
        assert_eq!(resolver().resolve_opt(None), None);
    }

    #[test]
    fn test_host_is_case_insensitive() {
        assert_eq!(slug("https://YOUR-GHOST-SITE.com/my-article/").as_deref(), Some("my-article"));
    }

    #[test]
    fn test_same_path_different_configured_host() {
        let link = "https://your-ghost-site.com/posts/my-article/";
        let other = LinkResolver::new(&ClientConfig::new("https://other-site.com", "k", "v6.0"));

        assert_eq!(resolver().resolve(link).map(ArticleRef::into_slug).as_deref(), Some("my-article"));
        assert_eq!(other.resolve(link), None);
    }

    #[test]
    fn test_unparseable_site_url_disables_site_links() {
        let broken = LinkResolver::new(&ClientConfig::new("not a url", "k", "v6.0"));
        assert_eq!(broken.resolve("https://your-ghost-site.com/my-article/"), None);
        assert_eq!(
            broken.resolve("mattelevizion://article/x").map(ArticleRef::into_slug).as_deref(),
            Some("x")
        );
    }

    #[test]
    fn test_generated_app_links_round_trip() {
        for s in ["a", "lajmi-i-dites", "2024-zgjedhjet", "x_y.z"] {
            let link = format!("mattelevizion://article/{}", s);
            assert_eq!(slug(&link).as_deref(), Some(s));
        }
    }
}
