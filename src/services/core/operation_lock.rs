//! Write lock for closet mutations.
//!
//! Item and suggestion writes go through a single tokio mutex so the store
//! only ever sees one writer, which keeps id uniqueness and cascades intact
//! when several sessions share one database.

use crate::types::errors::ClosetError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_millis(500);

/// Acquired by the closet service around every write.
#[derive(Clone)]
pub struct OperationLock {
    lock: Arc<Mutex<()>>,
    timeout: Duration,
}

impl OperationLock {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_ACQUIRE_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            lock: Arc::new(Mutex::new(())),
            timeout,
        }
    }
}

impl Default for OperationLock {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationLock {
    /// Wait up to the configured timeout; `Busy` if another write still holds the lock.
    pub async fn acquire(&self) -> Result<OwnedMutexGuard<()>, ClosetError> {
        match tokio::time::timeout(self.timeout, self.lock.clone().lock_owned()).await {
            Ok(guard) => Ok(guard),
            Err(_) => {
                log::warn!("Write lock busy after {:?}", self.timeout);
                Err(ClosetError::Busy)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/operation_lock_tests.rs"]
mod tests;
