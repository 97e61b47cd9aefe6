//! Scoped busy-state tracking for long-running operations.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared busy-state behind a full-screen loading overlay.
///
/// The tracker is cheaply cloneable; clones observe the same state. It counts
/// overlapping acquisitions, so nested or concurrent scopes each
/// acquire/release independently and the overlay stays up until the last one
/// finishes.
///
/// # Example
///
/// ```ignore
/// let loading = LoadingTracker::new();
///
/// let envelope = loading
///     .scope(|| client.tag_details())
///     .await?;
/// assert!(!loading.is_active());
/// ```
#[derive(Clone, Debug, Default)]
pub struct LoadingTracker {
    inner: Arc<LoadingInner>,
}

#[derive(Debug, Default)]
struct LoadingInner {
    active: AtomicUsize,
}

impl LoadingTracker {
    /// Create a new, idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the indicator.
    ///
    /// The acquisition is released exactly once, when the returned guard is
    /// dropped.
    pub fn begin(&self) -> LoadingGuard {
        self.inner.active.fetch_add(1, Ordering::AcqRel);
        LoadingGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Check whether any acquisition is outstanding.
    pub fn is_active(&self) -> bool {
        self.active_count() > 0
    }

    /// Number of outstanding acquisitions.
    pub fn active_count(&self) -> usize {
        self.inner.active.load(Ordering::Acquire)
    }

    /// Run one asynchronous unit of work under the indicator.
    ///
    /// The indicator is acquired before `f` is invoked and released exactly
    /// once on every exit path, including panics. The operation's output is
    /// forwarded unchanged; errors are neither caught nor altered.
    pub async fn scope<F, Fut>(&self, f: F) -> Fut::Output
    where
        F: FnOnce() -> Fut,
        Fut: Future,
    {
        let _guard = self.begin();
        f().await
    }
}

/// RAII handle for one acquisition of the loading indicator.
#[derive(Debug)]
pub struct LoadingGuard {
    inner: Arc<LoadingInner>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.inner.active.fetch_sub(1, Ordering::AcqRel);
    }
}
