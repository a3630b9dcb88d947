//! # Mattelevizion
//!
//! Read-only news client for a Ghost-powered site: fetches the feed and
//! articles, and opens articles from links and push notifications.
//!
//! ## Architecture
//!
//! ```text
//! URL               → LinkResolver       ─┐
//!                                         ├→ ArticleRef → NavigationDispatcher → Navigator
//! notification tap  → NotificationBridge ─┘
//!
//! screen → ContentClient → Fetcher → Ghost Content API
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export GHOST_URL=https://your-ghost-site.com
//! export GHOST_CONTENT_API_KEY=...
//!
//! # Latest posts, optionally for one tag
//! mattelevizion feed --tag sport
//!
//! # Open an article from a shared link
//! mattelevizion open https://your-ghost-site.com/posts/my-article/
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires the configuration, content client
/// and link resolver together.
pub mod app;

/// Configuration management.
///
/// Loads `~/.config/mattelevizion/config.toml`, then applies environment
/// overrides. [`ClientConfig`](config::ClientConfig) is the immutable slice
/// shared by the content client and link resolver.
pub mod config;

/// Command-line interface using clap.
pub mod cli;

/// Content retrieval.
///
/// - [`ContentClient`](content::ContentClient): list posts and read one post
/// - [`FeedController`](content::FeedController): latest-load-wins feed state
pub mod content;

/// Core domain models.
///
/// - [`Post`](domain::Post), [`Tag`](domain::Tag), [`FeedPage`](domain::FeedPage)
/// - [`ArticleRef`](domain::ArticleRef): validated article slug
/// - [`FeedTag`](domain::FeedTag): the fixed feed taxonomy
pub mod domain;

/// HTTP transport.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait the content client talks to
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Link resolution for app and site URLs.
pub mod linking;

/// Navigation dispatch and trigger listening.
pub mod navigation;

/// Push notification tap routing and token registration.
pub mod notifications;
