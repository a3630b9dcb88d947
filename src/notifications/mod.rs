//! Push notification glue.
//!
//! Two independent flows share only [`ArticleRef`](crate::domain::ArticleRef):
//!
//! - Tap routing: payload → [`NotificationTarget`] → navigation dispatcher
//! - Token registration: [`PushProvider`] → [`PushTokenStore`], fire and forget
//!
//! A failure in registration never affects tap routing.

pub mod bridge;
pub mod payload;
pub mod token_store;

pub use bridge::{NotificationBridge, PushProvider};
pub use payload::{NotificationPayload, NotificationTarget};
pub use token_store::{PushTokenStore, SupabaseTokenStore};
