//! A thread-safe, lazily-initialized [`LruStore`] wrapper.
//!
//! `Cache` is the shape every [`crate::group::Group`] holds as its main
//! cache: one [`LruStore<ByteView>`] behind one [`parking_lot::Mutex`], with
//! the store itself not allocated until the first `set`. There is no
//! reader/writer split — `get` mutates recency order, so it needs the same
//! exclusive access `set` does.
//!
//! # Examples
//!
//! ```
//! use meshcache::byte_view::ByteView;
//! use meshcache::cache::Cache;
//!
//! let cache = Cache::new(1024);
//! assert!(cache.get("k").is_none()); // miss on an uninitialized cache
//!
//! cache.set("k", ByteView::from("v"));
//! assert_eq!(cache.get("k").unwrap().as_str().unwrap(), "v");
//! ```

use crate::byte_view::ByteView;
use crate::lru::LruStore;
use parking_lot::Mutex;

/// A mutex-guarded [`LruStore<ByteView>`] that defers allocating its store
/// until the first write.
pub struct Cache {
    capacity: i64,
    lru: Mutex<Option<LruStore<ByteView>>>,
}

impl Cache {
    /// Creates a cache with the given byte `capacity` (`<= 0` means
    /// unbounded). The underlying store is not allocated yet.
    #[must_use]
    pub fn new(capacity: i64) -> Self {
        Cache {
            capacity,
            lru: Mutex::new(None),
        }
    }

    /// Looks up `key`. Returns a miss without allocating the store if
    /// nothing has ever been written to this cache.
    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut guard = self.lru.lock();
        guard.as_mut()?.get_cloned(key)
    }

    /// Stores `value` under `key`, lazily constructing the underlying
    /// [`LruStore`] on first use.
    pub fn set(&self, key: &str, value: ByteView) {
        let mut guard = self.lru.lock();
        guard
            .get_or_insert_with(|| LruStore::new(self.capacity, None))
            .set(key, value);
    }

    /// Returns the number of entries currently cached, or `0` if the store
    /// has never been allocated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lru.lock().as_ref().map_or(0, LruStore::len)
    }

    /// Returns `true` if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}
