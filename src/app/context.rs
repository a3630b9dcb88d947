use std::sync::Arc;

use crate::app::error::Result;
use crate::config::{ClientConfig, Config};
use crate::content::ContentClient;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::linking::LinkResolver;
use crate::navigation::{NavigationDispatcher, Navigator};
use crate::notifications::{PushTokenStore, SupabaseTokenStore};

pub struct AppContext {
    pub config: Config,
    pub client_config: Arc<ClientConfig>,
    pub content: Arc<ContentClient>,
    pub resolver: LinkResolver,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> =
            Arc::new(HttpFetcher::with_timeout(config.ghost.timeout())?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let client_config = Arc::new(config.client_config());
        let content = Arc::new(ContentClient::new(client_config.clone(), fetcher));
        let resolver = LinkResolver::new(&client_config);

        Self {
            config,
            client_config,
            content,
            resolver,
        }
    }

    pub fn dispatcher(&self, navigator: Arc<dyn Navigator>) -> Arc<NavigationDispatcher> {
        Arc::new(NavigationDispatcher::with_navigator(
            self.resolver.clone(),
            navigator,
        ))
    }

    /// Token store when push persistence is configured.
    pub fn token_store(&self) -> Result<Option<Arc<dyn PushTokenStore>>> {
        if !self.config.push.is_configured() {
            return Ok(None);
        }
        let store: Arc<dyn PushTokenStore> = Arc::new(SupabaseTokenStore::new(&self.config.push)?);
        Ok(Some(store))
    }
}
