use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::domain::ArticleRef;
use crate::linking::LinkResolver;
use crate::navigation::{Navigator, TriggerSource};

/// Turns resolved articles into navigation, one action per trigger.
///
/// The navigator can be swapped at any time (the router may be rebuilt
/// while trigger listeners stay subscribed); every dispatch reads the
/// current one. Identical repeated triggers are not deduplicated.
pub struct NavigationDispatcher {
    resolver: LinkResolver,
    navigator: RwLock<Option<Arc<dyn Navigator>>>,
}

impl NavigationDispatcher {
    pub fn new(resolver: LinkResolver) -> Self {
        Self {
            resolver,
            navigator: RwLock::new(None),
        }
    }

    pub fn with_navigator(resolver: LinkResolver, navigator: Arc<dyn Navigator>) -> Self {
        let dispatcher = Self::new(resolver);
        dispatcher.set_navigator(navigator);
        dispatcher
    }

    pub fn set_navigator(&self, navigator: Arc<dyn Navigator>) {
        *self.navigator.write().unwrap_or_else(|e| e.into_inner()) = Some(navigator);
    }

    pub fn clear_navigator(&self) {
        *self.navigator.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn resolver(&self) -> &LinkResolver {
        &self.resolver
    }

    /// Open the article with `slug`. Invalid slugs are ignored.
    pub fn open_article(&self, slug: &str) -> bool {
        match ArticleRef::new(slug) {
            Some(article) => self.navigate(&article),
            None => {
                debug!(slug, "Ignoring invalid article slug");
                false
            }
        }
    }

    /// Resolve `url` and navigate if it points at an article.
    pub fn handle_url(&self, source: TriggerSource, url: &str) -> bool {
        match self.resolver.resolve(url) {
            Some(article) => {
                info!(%source, %article, "Opening article from link");
                self.navigate(&article)
            }
            None => {
                debug!(%source, "Link is not an article");
                false
            }
        }
    }

    /// Navigate to an already-extracted article; `None` is silently ignored.
    pub fn dispatch(&self, source: TriggerSource, article: Option<ArticleRef>) -> bool {
        match article {
            Some(article) => {
                info!(%source, %article, "Opening article");
                self.navigate(&article)
            }
            None => false,
        }
    }

    fn navigate(&self, article: &ArticleRef) -> bool {
        let navigator = self
            .navigator
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        match navigator {
            Some(navigator) => {
                navigator.open_article(article);
                true
            }
            None => {
                warn!(%article, "No navigator registered, dropping navigation");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::navigation::tests::RecordingNavigator;

    fn resolver() -> LinkResolver {
        LinkResolver::new(&ClientConfig::new("https://your-ghost-site.com", "k", "v6.0"))
    }

    #[test]
    fn test_open_article() {
        let navigator = Arc::new(RecordingNavigator::default());
        let dispatcher = NavigationDispatcher::with_navigator(resolver(), navigator.clone());

        assert!(dispatcher.open_article("my-article"));
        assert!(!dispatcher.open_article(""));
        assert_eq!(navigator.opened(), ["my-article"]);
    }

    #[test]
    fn test_handle_url_ignores_non_articles() {
        let navigator = Arc::new(RecordingNavigator::default());
        let dispatcher = NavigationDispatcher::with_navigator(resolver(), navigator.clone());

        assert!(!dispatcher.handle_url(TriggerSource::UrlEvent, "https://example.com/x/"));
        assert!(!dispatcher.handle_url(TriggerSource::UrlEvent, "garbage"));
        assert!(dispatcher.handle_url(
            TriggerSource::InitialUrl,
            "https://your-ghost-site.com/posts/my-article/"
        ));
        assert_eq!(navigator.opened(), ["my-article"]);
    }

    #[test]
    fn test_repeated_triggers_each_navigate() {
        let navigator = Arc::new(RecordingNavigator::default());
        let dispatcher = NavigationDispatcher::with_navigator(resolver(), navigator.clone());

        dispatcher.handle_url(TriggerSource::InitialUrl, "mattelevizion://article/a");
        dispatcher.handle_url(TriggerSource::UrlEvent, "mattelevizion://article/a");
        dispatcher.dispatch(TriggerSource::NotificationTap, ArticleRef::new("a"));

        assert_eq!(navigator.opened(), ["a", "a", "a"]);
    }

    #[test]
    fn test_uses_latest_navigator() {
        let old = Arc::new(RecordingNavigator::default());
        let new = Arc::new(RecordingNavigator::default());
        let dispatcher = NavigationDispatcher::with_navigator(resolver(), old.clone());

        dispatcher.open_article("first");
        dispatcher.set_navigator(new.clone());
        dispatcher.open_article("second");

        assert_eq!(old.opened(), ["first"]);
        assert_eq!(new.opened(), ["second"]);
    }

    #[test]
    fn test_without_navigator() {
        let dispatcher = NavigationDispatcher::new(resolver());
        assert!(!dispatcher.open_article("a"));

        let navigator = Arc::new(RecordingNavigator::default());
        dispatcher.set_navigator(navigator.clone());
        dispatcher.clear_navigator();
        assert!(!dispatcher.open_article("a"));
        assert!(navigator.opened().is_empty());
    }

    #[test]
    fn test_dispatch_none_is_silent() {
        let navigator = Arc::new(RecordingNavigator::default());
        let dispatcher = NavigationDispatcher::with_navigator(resolver(), navigator.clone());

        assert!(!dispatcher.dispatch(TriggerSource::NotificationTap, None));
        assert!(navigator.opened().is_empty());
    }
}
