//! Content retrieval from the Ghost Content API.
//!
//! - [`ContentClient`]: one fetch-and-shape per call, no retries or caching
//! - [`FeedController`]: feed screen state where only the latest load lands

pub mod client;
pub mod feed;

pub use client::ContentClient;
pub use feed::{FeedController, FeedSnapshot};
