//! An immutable, owned byte buffer used as the cache's value type.
//!
//! `ByteView` is the unit of value this crate's [`crate::group::Group`] hands
//! back to callers and stores in its local cache. It exists to stop callers
//! from mutating — or racing on — buffers the cache still owns: every
//! accessor returns either a copy or a borrow that cannot outlive the view.
//!
//! # Examples
//!
//! ```
//! use meshcache::byte_view::ByteView;
//!
//! let view = ByteView::from(b"hello".to_vec());
//! assert_eq!(view.len(), 5);
//! assert_eq!(view.as_str().unwrap(), "hello");
//! assert_eq!(view.to_vec(), b"hello");
//! ```

use crate::lru::CacheValue;
use std::fmt;
use std::str::Utf8Error;
use std::sync::Arc;

/// A read-only view over a byte buffer owned by the cache.
///
/// Cloning a `ByteView` is cheap (an `Arc` clone); the underlying bytes are
/// shared, not copied, between clones. This is safe precisely because
/// nothing can get a mutable handle to those bytes once a `ByteView` exists
/// — every accessor below copies out or borrows with a lifetime tied to the
/// view itself.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct ByteView {
    bytes: Arc<[u8]>,
}

impl ByteView {
    /// Returns the number of bytes held by this view.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if this view holds no bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns a copy of the bytes as an owned [`Vec<u8>`].
    ///
    /// This always allocates; callers that only need to read the bytes
    /// should prefer [`ByteView::as_bytes`].
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Borrows the underlying bytes.
    ///
    /// The returned slice cannot outlive the `ByteView` and cannot be used
    /// to mutate the cached contents.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Interprets the bytes as UTF-8, borrowing rather than copying.
    ///
    /// Returns an error if the bytes are not valid UTF-8.
    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        core::str::from_utf8(&self.bytes)
    }

    /// Interprets the bytes as UTF-8, replacing invalid sequences with the
    /// replacement character and allocating a new `String`.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl CacheValue for ByteView {
    #[inline]
    fn size(&self) -> usize {
        self.len()
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        ByteView {
            bytes: Arc::from(bytes),
        }
    }
}

impl From<&[u8]> for ByteView {
    fn from(bytes: &[u8]) -> Self {
        ByteView {
            bytes: Arc::from(bytes),
        }
    }
}

impl From<String> for ByteView {
    fn from(s: String) -> Self {
        ByteView::from(s.into_bytes())
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        ByteView::from(s.as_bytes())
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Ok(s) => f.debug_tuple("ByteView").field(&s).finish(),
            Err(_) => f.debug_tuple("ByteView").field(&self.bytes).finish(),
        }
    }
}
