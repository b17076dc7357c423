//! Call coalescing: collapse concurrent duplicate calls for the same key
//! into a single execution.
//!
//! When many callers ask for the same key at the same moment — the classic
//! cache-stampede pattern — only the first caller actually runs the
//! supplied closure. Every other caller blocks until that first call
//! finishes, then receives a clone of its result. This bounds backend load
//! to one in-flight call per key, regardless of how many callers are
//! waiting on it.
//!
//! # Examples
//!
//! ```
//! use meshcache::singleflight::FlightGroup;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let group = Arc::new(FlightGroup::new());
//! let calls = Arc::new(AtomicUsize::new(0));
//!
//! let result = group.do_call("key", || {
//!     calls.fetch_add(1, Ordering::SeqCst);
//!     42
//! });
//! assert_eq!(result, 42);
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//! ```

use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::sync::Arc;

/// Shared state for one in-flight call: a result slot and a condvar to wake
/// waiters once it's filled.
struct Call<T> {
    done: Mutex<Option<T>>,
    condvar: Condvar,
}

/// A call coalescer keyed by string.
///
/// Holds no data of its own beyond the table of in-flight calls; typically
/// one `FlightGroup` is shared (behind an `Arc`) by every caller of a given
/// backend, one group per [`crate::group::Group`].
pub struct FlightGroup<T> {
    in_flight: Mutex<HashMap<String, Arc<Call<T>>>>,
}

impl<T: Clone> FlightGroup<T> {
    /// Creates an empty coalescer.
    #[must_use]
    pub fn new() -> Self {
        FlightGroup {
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Executes `f` on behalf of `key`, or — if another thread is already
    /// executing `f` for the same `key` — waits for that call to finish and
    /// returns a clone of its result instead.
    ///
    /// If `f` panics, the panic propagates to the caller that triggered the
    /// execution, and that call's in-flight entry is removed so a *later*
    /// `do_call` for the same key starts a fresh call rather than joining a
    /// dead one. This does not wake threads already blocked waiting on the
    /// panicking call — those remain parked until the process tears down.
    /// Callers in this crate never hit that path: a [`crate::group::Getter`]
    /// or [`crate::group::Peer`] reports failure through `Result`, not by
    /// panicking.
    pub fn do_call<F>(&self, key: &str, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let mut table = self.in_flight.lock();
        if let Some(existing) = table.get(key).cloned() {
            drop(table);
            return Self::wait(&existing);
        }

        let call = Arc::new(Call {
            done: Mutex::new(None),
            condvar: Condvar::new(),
        });
        table.insert(key.to_string(), Arc::clone(&call));
        drop(table);

        let guard = RemoveOnDrop {
            group: self,
            key,
        };
        let result = f();
        guard.disarm();

        self.in_flight.lock().remove(key);
        let mut done = call.done.lock();
        *done = Some(result.clone());
        call.condvar.notify_all();
        result
    }

    /// Returns the number of keys with a call currently in flight.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.lock().len()
    }

    fn wait(call: &Call<T>) -> T {
        let mut done = call.done.lock();
        loop {
            if let Some(value) = done.as_ref() {
                return value.clone();
            }
            call.condvar.wait(&mut done);
        }
    }
}

impl<T: Clone> Default for FlightGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for FlightGroup<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlightGroup")
            .field("in_flight", &self.in_flight.lock().len())
            .finish()
    }
}

/// Clears a key's in-flight entry if `f` panics, so a poisoned call doesn't
/// wedge every future caller for that key behind a result that will never
/// arrive.
struct RemoveOnDrop<'a, T> {
    group: &'a FlightGroup<T>,
    key: &'a str,
}

impl<T> RemoveOnDrop<'_, T> {
    fn disarm(self) {
        std::mem::forget(self);
    }
}

impl<T> Drop for RemoveOnDrop<'_, T> {
    fn drop(&mut self) {
        self.group.in_flight.lock().remove(self.key);
    }
}
