//! Tag-based query cache
//!
//! Query results are stored as JSON under a request key together with the
//! tags they provide. A mutation invalidates tags; every entry carrying one
//! of them is dropped so the next query refetches.

use dashmap::DashMap;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTag {
    MenuItems,
    Orders,
    DashboardData,
    Reservations,
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheTag::MenuItems => "MenuItems",
            CacheTag::Orders => "Orders",
            CacheTag::DashboardData => "DashboardData",
            CacheTag::Reservations => "Reservations",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    tags: Vec<CacheTag>,
    value: Value,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: DashMap<String, CacheEntry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(|e| e.value.clone())
    }

    pub fn insert(&self, key: impl Into<String>, tags: &[CacheTag], value: Value) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                tags: tags.to_vec(),
                value,
            },
        );
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop every entry providing any of `tags`; returns how many went
    pub fn invalidate_tags(&self, tags: &[CacheTag]) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.tags.iter().any(|t| tags.contains(t)));
        let dropped = before - self.entries.len();
        if dropped > 0 {
            tracing::debug!(?tags, dropped, "Cache entries invalidated");
        }
        dropped
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
