//! The bounded subroot cache (§4.4).
//!
//! `range::root` recomputes power-of-two subroots from scratch on every
//! call unless a cache absorbs the repeated work. The cache is keyed by
//! `(offset, width)` — only ever populated for `width` a power of two at
//! or above the configured threshold — and bounded by a byte budget rather
//! than an entry count, since [`Digest`] width varies with the algorithm in
//! force.

use std::sync::Mutex;

use lru::LruCache;

use crate::digest::Digest;

struct Inner {
    cache: LruCache<(u64, u64), Digest>,
    bytes_used: u64,
}

/// A thread-safe, byte-budget-bounded LRU cache of subroot digests.
pub struct SubrootCache {
    threshold: u64,
    capacity_bytes: u64,
    inner: Mutex<Inner>,
}

impl SubrootCache {
    /// `threshold` is the smallest power-of-two width worth caching;
    /// `capacity_bytes` bounds the total size of cached keys and digests.
    #[inline]
    pub fn new(threshold: u64, capacity_bytes: u64) -> Self {
        Self {
            threshold,
            capacity_bytes,
            inner: Mutex::new(Inner {
                cache: LruCache::unbounded(),
                bytes_used: 0,
            }),
        }
    }

    #[inline]
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    #[inline]
    pub fn get(&self, offset: u64, width: u64) -> Option<Digest> {
        let mut inner = self.inner.lock().unwrap();
        inner.cache.get(&(offset, width)).cloned()
    }

    /// Inserts a subroot, evicting least-recently-used entries until the
    /// byte budget is satisfied. A digest that alone exceeds the budget is
    /// silently not cached — the tree still works, just without that entry
    /// memoized.
    #[inline]
    pub fn insert(&self, offset: u64, width: u64, digest: Digest) {
        let entry_bytes = Self::entry_size(&digest);
        let mut inner = self.inner.lock().unwrap();

        if let Some(old) = inner.cache.pop(&(offset, width)) {
            inner.bytes_used -= Self::entry_size(&old);
        }

        if entry_bytes > self.capacity_bytes {
            return;
        }

        while inner.bytes_used + entry_bytes > self.capacity_bytes {
            match inner.cache.pop_lru() {
                Some((_, evicted)) => inner.bytes_used -= Self::entry_size(&evicted),
                None => break,
            }
        }

        inner.cache.put((offset, width), digest);
        inner.bytes_used += entry_bytes;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().cache.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.cache.clear();
        inner.bytes_used = 0;
    }

    #[inline]
    fn entry_size(digest: &Digest) -> u64 {
        (std::mem::size_of::<(u64, u64)>() + digest.len()) as u64
    }
}
