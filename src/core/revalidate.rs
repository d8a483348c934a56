//! View invalidation
//!
//! After a successful mutation the handlers mark a named view (a page path such
//! as `/dashboard/invoices`) as stale. The rendering layer either checks the
//! generation counter of a path or subscribes to the broadcast feed.
//!
//! ```text
//! handler ──▶ ViewCache::revalidate_path() ──▶ generation += 1
//!                                         └──▶ broadcast ──▶ subscribers
//! ```
//!
//! Invalidation is fire-and-forget: it never fails and gives no ordering
//! guarantee relative to invalidations issued by other handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Capability to mark a cached view as stale
pub trait Revalidator: Send + Sync {
    /// Mark the view at `path` stale
    fn revalidate_path(&self, path: &str);
}

/// A path invalidation published on the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevalidationEvent {
    pub path: String,
    /// Generation of the path after this invalidation (starts at 1)
    pub generation: u64,
    pub timestamp: DateTime<Utc>,
}

/// In-process view cache tracker
///
/// Cheap to clone; clones share the same counters and channel.
#[derive(Debug, Clone)]
pub struct ViewCache {
    generations: Arc<RwLock<HashMap<String, u64>>>,
    sender: broadcast::Sender<RevalidationEvent>,
}

impl ViewCache {
    /// Create a new cache tracker
    ///
    /// # Arguments
    ///
    /// * `capacity` - Buffer size of the broadcast feed; slow subscribers
    ///   past this many events observe `Lagged`
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            generations: Arc::new(RwLock::new(HashMap::new())),
            sender,
        }
    }

    /// Subscribe to invalidations
    pub fn subscribe(&self) -> broadcast::Receiver<RevalidationEvent> {
        self.sender.subscribe()
    }

    /// How many times `path` was invalidated (0 if never)
    pub fn generation(&self, path: &str) -> u64 {
        self.generations
            .read()
            .map(|g| g.get(path).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

impl Default for ViewCache {
    fn default() -> Self {
        Self::new(256)
    }
}

impl Revalidator for ViewCache {
    fn revalidate_path(&self, path: &str) {
        let generation = match self.generations.write() {
            Ok(mut generations) => {
                let counter = generations.entry(path.to_string()).or_insert(0);
                *counter += 1;
                *counter
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "view cache lock poisoned, skipping counter");
                0
            }
        };

        tracing::debug!(path, generation, "view invalidated");

        // No subscribers is fine
        let _ = self.sender.send(RevalidationEvent {
            path: path.to_string(),
            generation,
            timestamp: Utc::now(),
        });
    }
}
