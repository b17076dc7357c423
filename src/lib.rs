//! A sharded, peer-to-peer read-through in-memory cache core.
//!
//! This crate provides the building blocks for a distributed key/value
//! cache: a size-bounded LRU store, a thread-safe wrapper around it, a
//! consistent-hash ring for routing keys to peers, and a single-flight
//! coalescer that collapses concurrent cache misses for the same key into
//! one load. [`group::Group`] wires these into a namespaced cache that
//! looks up a key locally, then on a remote peer, then falls back to a
//! caller-supplied backend getter — without ever making two backend calls
//! for the same key at once.
//!
//! This crate does not include a network transport: [`group::Peer`] and
//! [`group::PeerPicker`] are traits an embedder implements over whatever
//! RPC mechanism it already uses.
//!
//! # Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                             Group                                │
//! │                                                                   │
//! │   get(key) ──▶ Cache (local) ──miss──▶ FlightGroup::do_call(key)  │
//! │                   ▲                          │                    │
//! │                   │                    ┌─────┴─────┐              │
//! │                   │                    ▼           ▼              │
//! │                   │              PeerPicker   Getter (backend)    │
//! │                   │              (via Ring)        │              │
//! │                   └──── populate on local load ─────┘              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```
//! use meshcache::config::GroupConfig;
//! use meshcache::group::{Group, GetterFn};
//!
//! let getter = GetterFn::new(|key: &str| Ok(format!("value-for-{key}").into_bytes()));
//! let group = Group::new("lib-doc-example", GroupConfig::new(1 << 20), getter).unwrap();
//! assert_eq!(group.get("alice").unwrap().as_str().unwrap(), "value-for-alice");
//! ```

pub mod byte_view;
pub mod cache;
pub mod config;
pub mod error;
pub mod group;
pub mod lru;
pub mod metrics;
pub mod ring;
pub mod singleflight;

pub use byte_view::ByteView;
pub use cache::Cache;
pub use config::GroupConfig;
pub use error::CacheError;
pub use group::{get_group, Getter, GetterFn, Group, Peer, PeerPicker};
pub use lru::{CacheValue, LruStore};
pub use metrics::GroupMetrics;
pub use ring::Ring;
pub use singleflight::FlightGroup;
