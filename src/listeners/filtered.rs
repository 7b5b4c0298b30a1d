//! # Predicate-filtered listener.
//!
//! [`Filtered`] forwards only the events accepted by a predicate, e.g. "changes
//! under this path". Register the wrapper itself; keep its handle for removal.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Listener, ListenerRef};
use crate::error::CommandError;

/// Listener wrapper that skips events rejected by `predicate`.
pub struct Filtered<E, P> {
    inner: ListenerRef<E>,
    predicate: P,
}

impl<E, P> Filtered<E, P>
where
    E: Send + Sync + 'static,
    P: Fn(&E) -> bool + Send + Sync + 'static,
{
    /// Wraps `inner`.
    pub fn new(inner: ListenerRef<E>, predicate: P) -> Self {
        Self { inner, predicate }
    }

    /// Wraps `inner` and returns the wrapper as a shared handle.
    pub fn arc(inner: ListenerRef<E>, predicate: P) -> ListenerRef<E> {
        Arc::new(Self::new(inner, predicate))
    }
}

#[async_trait]
impl<E, P> Listener<E> for Filtered<E, P>
where
    E: Send + Sync + 'static,
    P: Fn(&E) -> bool + Send + Sync + 'static,
{
    async fn event_processed(&self, event: &E) -> Result<(), CommandError> {
        if (self.predicate)(event) {
            self.inner.event_processed(event).await
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct Collect(Mutex<Vec<String>>);

    #[async_trait]
    impl Listener<String> for Collect {
        async fn event_processed(&self, event: &String) -> Result<(), CommandError> {
            self.0.lock().push(event.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_only_matching_events_pass() {
        let inner = Arc::new(Collect::default());
        let filtered = Filtered::new(inner.clone() as ListenerRef<String>, |path: &String| {
            path.starts_with("/services/")
        });

        for path in ["/services/a", "/config/x", "/services/b"] {
            filtered.event_processed(&path.to_string()).await.unwrap();
        }
        assert_eq!(*inner.0.lock(), vec!["/services/a", "/services/b"]);
    }
}
