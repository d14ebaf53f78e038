//! String interning pool for result paths.
//!
//! Lookups for related patterns ("foo", "foo.", "foo.t") return largely the
//! same paths. The pool hands out one shared `Arc<str>` per distinct path so
//! every cache entry that holds a path shares its allocation.

use std::sync::Arc;

use fnv::FnvHashSet;

/// A pool that interns strings, storing each unique string exactly once.
#[derive(Default)]
pub struct PathPool {
    inner: FnvHashSet<Arc<str>>,
}

impl std::fmt::Debug for PathPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathPool")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl PathPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pooled handle for `path`, inserting it on first sight.
    pub fn intern(&mut self, path: &str) -> Arc<str> {
        if let Some(existing) = self.inner.get(path) {
            return existing.clone();
        }
        let handle: Arc<str> = Arc::from(path);
        self.inner.insert(handle.clone());
        handle
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Drops the pool's handles. Handles already given out stay valid.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}
