use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::content::ContentClient;
use crate::domain::{FeedQuery, Pagination, Post, DEFAULT_LIMIT};

/// What the feed screen currently shows.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub tag: Option<String>,
    pub posts: Vec<Post>,
    pub pagination: Option<Pagination>,
    pub error: Option<String>,
}

/// Feed state for one screen.
///
/// Loads may overlap (rapid tag switching). Each load takes a generation
/// number up front and only the newest generation may write the snapshot;
/// older responses are dropped on arrival.
pub struct FeedController {
    client: Arc<ContentClient>,
    limit: u32,
    generation: AtomicU64,
    snapshot: Mutex<FeedSnapshot>,
}

impl FeedController {
    pub fn new(client: Arc<ContentClient>) -> Self {
        Self::with_limit(client, DEFAULT_LIMIT)
    }

    pub fn with_limit(client: Arc<ContentClient>, limit: u32) -> Self {
        Self {
            client,
            limit,
            generation: AtomicU64::new(0),
            snapshot: Mutex::new(FeedSnapshot::default()),
        }
    }

    /// Load the feed for `tag`. Returns false when a newer load superseded this one.
    pub async fn load(&self, tag: Option<String>) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = FeedQuery::new()
            .with_limit(self.limit)
            .with_optional_tag(tag.clone());

        let result = self.client.list_posts(&query).await;

        let mut snapshot = self.snapshot.lock().unwrap_or_else(|e| e.into_inner());
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(?tag, "Discarding stale feed response");
            return false;
        }

        *snapshot = match result {
            Ok(page) => FeedSnapshot {
                tag,
                posts: page.posts,
                pagination: page.pagination,
                error: None,
            },
            Err(e) => FeedSnapshot {
                tag,
                posts: Vec::new(),
                pagination: None,
                error: Some(e.to_string()),
            },
        };
        true
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.snapshot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
