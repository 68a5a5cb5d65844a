//! Counter-backed stand-in for the merge board.
use std::sync::atomic::{AtomicU32, Ordering};

use merge_core::MergeArena;

/// Board that only tracks how many items and obstacles it holds.
#[derive(Debug, Default)]
pub struct Board {
    items: AtomicU32,
    disturbances: AtomicU32,
}

impl Board {
    pub fn with_items(items: u32) -> Self {
        Self {
            items: AtomicU32::new(items),
            disturbances: AtomicU32::new(0),
        }
    }

    /// Merges one pair of items into a new one.
    pub fn merge(&self) -> bool {
        self.items
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |items| {
                (items >= 2).then(|| items - 1)
            })
            .is_ok()
    }

    pub fn refill(&self, items: u32) {
        self.items.fetch_add(items, Ordering::SeqCst);
    }

    pub fn disturbances(&self) -> u32 {
        self.disturbances.load(Ordering::SeqCst)
    }
}

impl MergeArena for Board {
    fn remove_random_item(&self) -> bool {
        let removed = self
            .items
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |items| items.checked_sub(1))
            .is_ok();
        tracing::debug!(target: "sim::arena", removed, "item removed by curse");
        removed
    }

    fn spawn_disturbance_object(&self) {
        let total = self.disturbances.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(target: "sim::arena", total, "disturbance spawned");
    }

    fn item_count(&self) -> u32 {
        self.items.load(Ordering::SeqCst)
    }
}
