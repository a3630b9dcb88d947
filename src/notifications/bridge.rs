use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::app::Result;
use crate::navigation::{NavigationDispatcher, TriggerSource};
use crate::notifications::payload::{NotificationPayload, NotificationTarget};
use crate::notifications::token_store::PushTokenStore;

/// Platform push capability. Platforms without push have no provider at all.
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Ask for a push token. `Ok(None)` means permission was not granted.
    async fn request_token(&self) -> Result<Option<String>>;
}

/// Routes notification taps to the dispatcher and registers the device
/// token in the background.
pub struct NotificationBridge {
    dispatcher: Arc<NavigationDispatcher>,
    provider: Option<Arc<dyn PushProvider>>,
    token_store: Option<Arc<dyn PushTokenStore>>,
}

impl NotificationBridge {
    /// Bridge for a platform without push: taps still route, nothing registers.
    pub fn new(dispatcher: Arc<NavigationDispatcher>) -> Self {
        Self {
            dispatcher,
            provider: None,
            token_store: None,
        }
    }

    pub fn with_push(
        dispatcher: Arc<NavigationDispatcher>,
        provider: Arc<dyn PushProvider>,
        token_store: Option<Arc<dyn PushTokenStore>>,
    ) -> Self {
        Self {
            dispatcher,
            provider: Some(provider),
            token_store,
        }
    }

    pub fn supports_push(&self) -> bool {
        self.provider.is_some()
    }

    /// Kick off token registration. Returns the task handle, or `None`
    /// when the platform has no push capability.
    pub fn start(&self) -> Option<JoinHandle<Option<String>>> {
        let Some(provider) = self.provider.clone() else {
            debug!("Push notifications not available on this platform");
            return None;
        };
        let token_store = self.token_store.clone();

        Some(tokio::spawn(async move {
            register_device(provider.as_ref(), token_store.as_deref()).await
        }))
    }

    /// Route a tapped notification. Payloads without a slug do nothing.
    pub fn handle_tap(&self, payload: &NotificationPayload) -> bool {
        let target = NotificationTarget::classify(payload);
        debug!(?target, "Notification tapped");
        self.dispatcher
            .dispatch(TriggerSource::NotificationTap, target.article())
    }

    /// Notification delivered while the app is in the foreground.
    pub fn handle_received(&self, payload: &NotificationPayload) {
        info!(keys = ?payload.keys().collect::<Vec<_>>(), "Notification received");
    }
}

/// Returns the token when one was obtained, whether or not storing it worked.
async fn register_device(
    provider: &dyn PushProvider,
    token_store: Option<&dyn PushTokenStore>,
) -> Option<String> {
    let token = match provider.request_token().await {
        Ok(Some(token)) => token,
        Ok(None) => {
            warn!("Failed to get push notification permissions");
            return None;
        }
        Err(e) => {
            error!("Error getting push token: {}", e);
            return None;
        }
    };

    match token_store {
        Some(store) => match store.register(&token).await {
            Ok(()) => info!("Registered push token"),
            Err(e) => error!("Failed to register push token: {}", e),
        },
        None => debug!("No token store configured, keeping push token local"),
    }

    Some(token)
}
