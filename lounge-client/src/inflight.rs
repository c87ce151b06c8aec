//! Single-flight guard
//!
//! A submission holds its action key until the guard drops. A second
//! submission of the same key in the meantime is rejected instead of queued.

use dashmap::DashSet;
use std::sync::Arc;

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<DashSet<String>>,
}

/// Releases its key on drop
#[derive(Debug)]
pub struct InFlightGuard {
    keys: Arc<DashSet<String>>,
    key: String,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, key: &str) -> ClientResult<InFlightGuard> {
        if !self.keys.insert(key.to_string()) {
            tracing::warn!(key, "Duplicate submission rejected");
            return Err(ClientError::DuplicateSubmission(key.to_string()));
        }
        Ok(InFlightGuard {
            keys: Arc::clone(&self.keys),
            key: key.to_string(),
        })
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys.remove(&self.key);
    }
}
