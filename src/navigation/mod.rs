//! Routing resolved articles to whatever screen stack is in charge.
//!
//! - [`Navigator`]: implemented by the UI; pushes the article screen
//! - [`NavigationDispatcher`]: one navigation per trigger, always via the latest navigator
//! - [`spawn_trigger_listener`]: background task feeding URL events and notification taps in

pub mod dispatcher;
pub mod listener;

pub use dispatcher::NavigationDispatcher;
pub use listener::{spawn_trigger_listener, TriggerHandle};

use std::fmt;

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::ArticleRef;

/// Where a navigation request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    /// URL the process was launched with
    InitialUrl,
    /// URL delivered while running
    UrlEvent,
    /// User tapped a push notification
    NotificationTap,
}

impl fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TriggerSource::InitialUrl => "initial-url",
            TriggerSource::UrlEvent => "url-event",
            TriggerSource::NotificationTap => "notification-tap",
        };
        f.write_str(name)
    }
}

/// The screen router. Implementations push the article screen for `article`.
pub trait Navigator: Send + Sync {
    fn open_article(&self, article: &ArticleRef);
}

/// Navigator that hands articles to an async consumer over a channel.
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<ArticleRef>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ArticleRef>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn open_article(&self, article: &ArticleRef) {
        if self.tx.send(article.clone()).is_err() {
            warn!("Article screen is gone, dropping navigation to {}", article);
        }
    }
}
