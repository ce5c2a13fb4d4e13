//! Per-account serialization

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Registry of one async mutex per account.
///
/// Holding the guard returned by [`AccountLocks::lock`] makes a
/// read-check-write sequence against that account exclusive. Different
/// accounts never contend with each other.
#[derive(Debug, Default)]
pub struct AccountLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl AccountLocks {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to an account
    pub async fn lock(&self, account_id: Uuid) -> OwnedMutexGuard<()> {
        // Clone out of the map so the shard guard is released before awaiting
        let lock = self.locks.entry(account_id).or_default().clone();
        lock.lock_owned().await
    }

    /// Number of accounts that have been locked at least once
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no account has been locked yet
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
