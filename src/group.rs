//! Namespaced, peer-aware read-through caching.
//!
//! A [`Group`] ties together everything else in this crate: a local
//! [`Cache`], a [`Ring`]-backed [`PeerPicker`] (optional), a backend
//! [`Getter`] of last resort, and a [`FlightGroup`] that coalesces
//! concurrent misses for the same key into one load.
//!
//! # Examples
//!
//! ```
//! use meshcache::config::GroupConfig;
//! use meshcache::group::{Group, GetterFn};
//!
//! let getter = GetterFn::new(|key: &str| Ok(format!("value-for-{key}").into_bytes()));
//! let group = Group::new("demo-group-1", GroupConfig::new(1 << 20), getter).unwrap();
//!
//! let value = group.get("alice").unwrap();
//! assert_eq!(value.as_str().unwrap(), "value-for-alice");
//! ```

use crate::byte_view::ByteView;
use crate::cache::Cache;
use crate::config::GroupConfig;
use crate::error::CacheError;
use crate::metrics::GroupMetrics;
use crate::singleflight::FlightGroup;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Loads a value for a key that was not found in any cache, local or
/// remote.
///
/// This is the interface a caller implements to connect a [`Group`] to
/// whatever actually stores the data — a database, an object store, another
/// service. The core never calls a getter while holding a lock.
pub trait Getter: Send + Sync {
    /// Returns the current value for `key`, or an error if it cannot be
    /// produced.
    fn get(&self, key: &str) -> Result<Vec<u8>, CacheError>;
}

/// Adapts a plain closure into a [`Getter`].
pub struct GetterFn<F> {
    f: F,
}

impl<F> GetterFn<F>
where
    F: Fn(&str) -> Result<Vec<u8>, CacheError> + Send + Sync,
{
    /// Wraps `f` as a [`Getter`].
    pub fn new(f: F) -> Arc<Self> {
        Arc::new(GetterFn { f })
    }
}

impl<F> Getter for GetterFn<F>
where
    F: Fn(&str) -> Result<Vec<u8>, CacheError> + Send + Sync,
{
    fn get(&self, key: &str) -> Result<Vec<u8>, CacheError> {
        (self.f)(key)
    }
}

impl<F> fmt::Debug for GetterFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetterFn").finish_non_exhaustive()
    }
}

/// A handle to a remote peer that can answer lookups for keys it owns.
pub trait Peer: Send + Sync {
    /// Fetches `key` from group `group` on this peer.
    fn fetch(&self, group: &str, key: &str) -> Result<Vec<u8>, CacheError>;
}

/// Maps a key to the peer that owns it.
///
/// Returning `None` covers both "the owning node is this process" and "no
/// peer topology is configured yet" — either way, the caller should fall
/// back to the local getter.
pub trait PeerPicker: Send + Sync {
    /// Picks the peer owning `key`, or `None` to fall back to the local
    /// getter.
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn Peer>>;
}

/// A named, peer-aware, single-flight-coalesced read-through cache.
pub struct Group {
    name: String,
    getter: Arc<dyn Getter>,
    main_cache: Cache,
    peers: RwLock<Option<Arc<dyn PeerPicker>>>,
    loads: FlightGroup<Result<ByteView, CacheError>>,
    metrics: GroupMetrics,
}

impl Group {
    /// Creates a group named `name`, registers it in the process-wide
    /// registry, and returns a shared handle to it.
    ///
    /// Fails with [`CacheError::Config`] if a group with this name already
    /// exists.
    pub fn new(
        name: impl Into<String>,
        config: GroupConfig,
        getter: Arc<dyn Getter>,
    ) -> Result<Arc<Group>, CacheError> {
        let name = name.into();
        let group = Arc::new(Group {
            name: name.clone(),
            getter,
            main_cache: Cache::new(config.capacity),
            peers: RwLock::new(None),
            loads: FlightGroup::new(),
            metrics: GroupMetrics::new(),
        });

        let mut registry = registry().write();
        if registry.contains_key(&name) {
            return Err(CacheError::Config(format!(
                "group {name:?} is already registered"
            )));
        }
        registry.insert(name, Arc::clone(&group));
        Ok(group)
    }

    /// Returns this group's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Installs the peer-picker this group uses to route cache misses to
    /// remote peers before falling back to the local getter.
    ///
    /// Fails with [`CacheError::Config`] if a picker is already installed.
    pub fn register_peers(&self, picker: Arc<dyn PeerPicker>) -> Result<(), CacheError> {
        let mut peers = self.peers.write();
        if peers.is_some() {
            return Err(CacheError::Config(format!(
                "group {:?} already has a peer picker registered",
                self.name
            )));
        }
        *peers = Some(picker);
        Ok(())
    }

    /// Looks up `key`, consulting the local cache, then a remote peer (if
    /// one owns `key`), then the backend getter, in that order.
    ///
    /// Concurrent misses for the same `key` on this group coalesce into a
    /// single load.
    pub fn get(&self, key: &str) -> Result<ByteView, CacheError> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey);
        }

        if let Some(value) = self.main_cache.get(key) {
            tracing::debug!(group = %self.name, key, "cache hit");
            self.metrics.record_cache_hit();
            return Ok(value);
        }

        self.loads.do_call(key, || self.load(key))
    }

    /// Returns the number of entries in this group's local cache.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.main_cache.len()
    }

    /// Returns this group's hit/miss/load counters.
    #[must_use]
    pub fn metrics(&self) -> &GroupMetrics {
        &self.metrics
    }

    fn load(&self, key: &str) -> Result<ByteView, CacheError> {
        let picker = self.peers.read().clone();
        if let Some(picker) = picker {
            if let Some(peer) = picker.pick_peer(key) {
                match peer.fetch(&self.name, key) {
                    Ok(bytes) => {
                        tracing::debug!(group = %self.name, key, "peer hit");
                        self.metrics.record_peer_hit();
                        return Ok(ByteView::from(bytes));
                    }
                    Err(err) => {
                        tracing::warn!(group = %self.name, key, error = %err, "peer fetch failed, falling back to local load");
                        self.metrics.record_peer_failure();
                    }
                }
            }
        }

        let bytes = self.getter.get(key).map_err(|err| {
            self.metrics.record_load_error();
            CacheError::Backend(err.to_string())
        })?;
        let value = ByteView::from(bytes);
        self.main_cache.set(key, value.clone());
        tracing::debug!(group = %self.name, key, "cache load");
        self.metrics.record_load();
        Ok(value)
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("cache_len", &self.cache_len())
            .field("has_peers", &self.peers.read().is_some())
            .finish_non_exhaustive()
    }
}

fn registry() -> &'static RwLock<HashMap<String, Arc<Group>>> {
    static REGISTRY: OnceLock<RwLock<HashMap<String, Arc<Group>>>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Looks up a previously created group by name.
#[must_use]
pub fn get_group(name: &str) -> Option<Arc<Group>> {
    registry().read().get(name).cloned()
}
