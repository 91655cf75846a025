// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory key-value cache with passive TTL expiry.
//!
//! Entries are never swept in the background; an expired entry is treated as
//! absent and dropped the next time it is read. Misses can be resolved through
//! [`TtlCache::get_or_try_insert_with`], which serializes concurrent misses for
//! the same key so only one caller performs the fetch.

use dashmap::DashMap;
use std::borrow::Borrow;
use std::convert::Infallible;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Concurrent TTL cache shared across requests.
pub struct TtlCache<K, V> {
    entries: DashMap<K, CacheEntry<V>>,
    /// Per-key mutex to serialize fetches on a miss.
    fill_locks: DashMap<K, Arc<Mutex<()>>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            fill_locks: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the live value for `key`, evicting it if it has expired.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();

        match self.entries.get(key) {
            Some(entry) if now < entry.expires_at => return Some(entry.value.clone()),
            Some(_) => {}
            None => return None,
        }

        // Re-check under the shard lock: another task may have refilled it.
        self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        None
    }

    /// Store `value` under `key` for one TTL, replacing any previous entry.
    pub fn insert(&self, key: K, value: V) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the cached value or run `fetch` and cache its success.
    ///
    /// Concurrent callers missing on the same key wait for the first one and
    /// then read its result from the cache. Errors are not cached.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }

        let lock = self
            .fill_locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let guard = lock.lock().await;

        let result = match self.get(&key) {
            Some(value) => Ok(value),
            None => fetch().await.map(|value| {
                self.insert(key.clone(), value.clone());
                value
            }),
        };

        // Still holding the guard: only the map and `lock` reference it when
        // nobody else is waiting, so the last one out removes it.
        self.fill_locks
            .remove_if(&key, |_, l| Arc::strong_count(l) <= 2);
        drop(guard);

        result
    }

    #[cfg(test)]
    fn fill_locks_len(&self) -> usize {
        self.fill_locks.len()
    }

    /// Infallible form of [`TtlCache::get_or_try_insert_with`].
    pub async fn get_or_insert_with<F, Fut>(&self, key: K, fetch: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let result = self
            .get_or_try_insert_with(key, move || async move { Ok::<V, Infallible>(fetch().await) })
            .await;

        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}
