//! A load-once memoization table safe for concurrent first access.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Slot<V> = Arc<Mutex<Option<V>>>;

/// Memoizes values per key, running the loader at most once per key.
///
/// Each key owns a slot with its own lock. Callers racing on the same
/// uncached key serialize on that slot, so only the first one loads and the
/// rest receive the stored value. Different keys load in parallel.
///
/// Failed loads are not stored: the next caller for that key loads again.
#[derive(Debug)]
pub struct LoadingCache<K, V> {
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> Default for LoadingCache<K, V> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> LoadingCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, loading it with `load` on a miss.
    ///
    /// # Errors
    ///
    /// Returns the loader's error; nothing is cached in that case.
    pub fn get_or_try_load<E, F>(&self, key: &K, load: F) -> Result<V, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        let slot = {
            let mut slots = lock(&self.slots);
            Arc::clone(slots.entry(key.clone()).or_default())
        };

        let mut value = lock(&slot);
        if let Some(cached) = value.as_ref() {
            return Ok(cached.clone());
        }

        let loaded = load(key)?;
        *value = Some(loaded.clone());
        Ok(loaded)
    }

    /// Number of keys with a successfully loaded value.
    #[must_use]
    pub fn len(&self) -> usize {
        let slots: Vec<Slot<V>> = lock(&self.slots).values().cloned().collect();
        slots.iter().filter(|slot| lock(slot).is_some()).count()
    }

    /// Returns true if nothing has been loaded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
