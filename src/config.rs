//! Configuration for creating a [`crate::group::Group`].

/// Options controlling how a [`crate::group::Group`] is constructed.
///
/// `GroupConfig` is the single entry point for tuning a group: construct
/// one, adjust the fields that matter, and pass it to
/// [`crate::group::Group::new`]. A group's name and backend getter are
/// separate constructor arguments, not config fields, since the type
/// system already makes both mandatory.
///
/// # Examples
///
/// ```
/// use meshcache::config::GroupConfig;
///
/// let config = GroupConfig::new(64 << 20);
/// assert_eq!(config.capacity, 64 << 20);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GroupConfig {
    /// Maximum total size, in bytes, of keys plus values held in the
    /// group's local cache. `<= 0` means unbounded.
    pub capacity: i64,
}

impl GroupConfig {
    /// Creates a config with the given byte `capacity`.
    #[must_use]
    pub fn new(capacity: i64) -> Self {
        GroupConfig { capacity }
    }
}

impl Default for GroupConfig {
    /// An unbounded cache.
    fn default() -> Self {
        GroupConfig::new(0)
    }
}
