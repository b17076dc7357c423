//! Error types returned by this crate's fallible operations.

use thiserror::Error;

/// Errors produced while creating or using a [`crate::group::Group`].
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// A key was empty. Empty keys are rejected up front, before the cache
    /// or getter ever sees them.
    #[error("key must not be empty")]
    InvalidKey,

    /// The backend getter failed to produce a value for a key.
    #[error("backend getter failed: {0}")]
    Backend(String),

    /// A remote peer failed to answer a lookup it owned.
    #[error("peer lookup failed: {0}")]
    Peer(String),

    /// A [`crate::group::Group`] could not be created or configured.
    #[error("invalid group configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(CacheError::InvalidKey.to_string(), "key must not be empty");
        assert_eq!(
            CacheError::Backend("db down".to_string()).to_string(),
            "backend getter failed: db down"
        );
        assert_eq!(
            CacheError::Peer("timeout".to_string()).to_string(),
            "peer lookup failed: timeout"
        );
        assert_eq!(
            CacheError::Config("duplicate group".to_string()).to_string(),
            "invalid group configuration: duplicate group"
        );
    }
}
