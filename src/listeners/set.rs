//! # Copy-on-write listener set.
//!
//! [`ListenerSet`] keeps its members in an immutable `Arc<Vec<_>>`. Readers take a
//! snapshot (one `Arc` clone) and iterate it without holding any lock; writers
//! build a new vector and swap it in.
//!
//! ```text
//! add/remove ──► lock ─► clone Vec ─► mutate ─► swap Arc ─► unlock
//! snapshot() ──► lock ─► Arc::clone ─► unlock ─► iterate freely
//! ```
//!
//! ## Rules
//! - **Set semantics**: adding the same `Arc` twice keeps one entry.
//! - **Identity**: membership is pointer equality of the `Arc`, not value equality.
//! - **Order**: iteration follows registration order.
//! - Mutating during iteration never affects a snapshot already taken.

use std::sync::Arc;

use parking_lot::Mutex;

use super::ListenerRef;

/// Registration-ordered set of listeners with snapshot iteration.
pub struct ListenerSet<E> {
    members: Mutex<Arc<Vec<ListenerRef<E>>>>,
}

impl<E> ListenerSet<E> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: Mutex::new(Arc::new(Vec::new())),
        }
    }

    /// Adds `listener`; returns `false` if it was already present.
    pub fn add(&self, listener: ListenerRef<E>) -> bool {
        let mut members = self.members.lock();
        if members.iter().any(|l| same(l, &listener)) {
            return false;
        }
        let mut next = Vec::with_capacity(members.len() + 1);
        next.extend(members.iter().cloned());
        next.push(listener);
        *members = Arc::new(next);
        true
    }

    /// Removes `listener`; returns `false` if it was not present.
    pub fn remove(&self, listener: &ListenerRef<E>) -> bool {
        let mut members = self.members.lock();
        if !members.iter().any(|l| same(l, listener)) {
            return false;
        }
        let next: Vec<_> = members
            .iter()
            .filter(|l| !same(l, listener))
            .cloned()
            .collect();
        *members = Arc::new(next);
        true
    }

    /// Returns the current members; later mutations do not affect it.
    pub fn snapshot(&self) -> Arc<Vec<ListenerRef<E>>> {
        Arc::clone(&self.members.lock())
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.members.lock().len()
    }

    /// Returns `true` if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.members.lock().is_empty()
    }
}

impl<E> Default for ListenerSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Pointer identity, ignoring vtable metadata.
fn same<E>(a: &ListenerRef<E>, b: &ListenerRef<E>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}
