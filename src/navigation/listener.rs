use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::navigation::{NavigationDispatcher, TriggerSource};
use crate::notifications::{NotificationBridge, NotificationPayload};

/// Message type for the trigger listener
#[derive(Debug)]
pub enum TriggerMessage {
    /// A link delivered while running
    Url(String),
    /// A tapped notification's data payload
    NotificationTap(NotificationPayload),
    /// Stop listening
    Shutdown,
}

/// Handle to feed triggers into a running listener
#[derive(Clone)]
pub struct TriggerHandle {
    tx: mpsc::Sender<TriggerMessage>,
}

impl TriggerHandle {
    pub async fn url_event(&self, url: impl Into<String>) {
        self.send(TriggerMessage::Url(url.into())).await;
    }

    pub async fn notification_tap(&self, payload: NotificationPayload) {
        self.send(TriggerMessage::NotificationTap(payload)).await;
    }

    pub async fn shutdown(&self) {
        let _ = self.tx.send(TriggerMessage::Shutdown).await;
    }

    async fn send(&self, msg: TriggerMessage) {
        if let Err(e) = self.tx.send(msg).await {
            warn!("Trigger listener stopped, dropping {:?}", e.0);
        }
    }
}

/// Spawn the listener task. The initial URL, if any, is handled before any
/// live event. The task ends on shutdown or once every handle is dropped and
/// yields the number of navigations it triggered.
pub fn spawn_trigger_listener(
    dispatcher: Arc<NavigationDispatcher>,
    bridge: Arc<NotificationBridge>,
    initial_url: Option<String>,
) -> (TriggerHandle, JoinHandle<usize>) {
    let (tx, mut rx) = mpsc::channel(32);

    let task = tokio::spawn(async move {
        info!("Trigger listener started");
        let mut navigations = 0;

        if let Some(url) = initial_url {
            if dispatcher.handle_url(TriggerSource::InitialUrl, &url) {
                navigations += 1;
            }
        }

        while let Some(msg) = rx.recv().await {
            let navigated = match msg {
                TriggerMessage::Url(url) => dispatcher.handle_url(TriggerSource::UrlEvent, &url),
                TriggerMessage::NotificationTap(payload) => bridge.handle_tap(&payload),
                TriggerMessage::Shutdown => break,
            };
            if navigated {
                navigations += 1;
            }
        }

        info!("Trigger listener stopped after {} navigations", navigations);
        navigations
    });

    (TriggerHandle { tx }, task)
}
