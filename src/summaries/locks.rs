use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use time::Date;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

pub type DayKey = (Uuid, Date);

/// One async mutex per (user, day). Entries are dropped once nobody holds or waits on them.
#[derive(Default)]
pub struct DayLocks {
    inner: Mutex<HashMap<DayKey, Arc<AsyncMutex<()>>>>,
}

impl DayLocks {
    pub async fn lock(&self, key: DayKey) -> DayGuard<'_> {
        let slot = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            map.entry(key).or_default().clone()
        };
        let guard = slot.lock_owned().await;
        DayGuard {
            locks: self,
            key,
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

pub struct DayGuard<'a> {
    locks: &'a DayLocks,
    key: DayKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for DayGuard<'_> {
    fn drop(&mut self) {
        // release first so our own handle no longer counts
        drop(self.guard.take());
        let mut map = self
            .locks
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if map
            .get(&self.key)
            .is_some_and(|slot| Arc::strong_count(slot) == 1)
        {
            map.remove(&self.key);
        }
    }
}
