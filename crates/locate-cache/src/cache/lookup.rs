//! Cache of unfiltered index lookups.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use fnv::FnvHashMap;

use crate::backend::LocateBackend;
use crate::error::Result;
use crate::paths::HomeLayout;
use crate::pool::PathPool;
use crate::query::LocateQuery;

/// Raw lookup results keyed by their exact invocation parameters.
///
/// Entries are filled once and never change; a failed tool run is cached as
/// an empty result. The cache has no expiry of its own.
#[derive(Debug, Default)]
pub struct RawLookupCache {
    entries: FnvHashMap<LocateQuery, Vec<Arc<str>>>,
}

impl RawLookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached paths for `query`, running the backend on a miss.
    ///
    /// OS-level failures are returned without caching anything.
    pub fn get_or_fetch(
        &mut self,
        query: &LocateQuery,
        backend: &dyn LocateBackend,
        layout: &HomeLayout,
        pool: &mut PathPool,
    ) -> Result<&[Arc<str>]> {
        match self.entries.entry(query.clone()) {
            Entry::Occupied(occupied) => {
                log::trace!("raw lookup hit for {:?}", query.pattern);
                Ok(occupied.into_mut().as_slice())
            }
            Entry::Vacant(vacant) => {
                let results = fetch(query, backend, layout, pool)?;
                Ok(vacant.insert(results).as_slice())
            }
        }
    }

    #[cfg(test)]
    fn contains(&self, query: &LocateQuery) -> bool {
        self.entries.contains_key(query)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn fetch(
    query: &LocateQuery,
    backend: &dyn LocateBackend,
    layout: &HomeLayout,
    pool: &mut PathPool,
) -> Result<Vec<Arc<str>>> {
    let mut results = Vec::new();
    let mut undecodable = 0usize;

    let outcome = backend.locate(query, &mut |record: &[u8]| {
        let Ok(path) = std::str::from_utf8(record) else {
            undecodable += 1;
            return;
        };
        if !path.is_empty() && !layout.is_excluded(path) {
            results.push(pool.intern(path));
        }
    });

    match outcome {
        Ok(()) => {}
        Err(error) if error.is_tool_failure() => {
            log::warn!("locate {:?}: {error}; caching no results", query.pattern);
            results.clear();
        }
        Err(error) => return Err(error),
    }

    if undecodable > 0 {
        log::warn!(
            "locate {:?}: skipped {undecodable} paths that are not valid UTF-8",
            query.pattern
        );
    }
    log::debug!(
        "raw lookup {:?} base_name={} ignore_case={} -> {} paths",
        query.pattern,
        query.base_name_only,
        query.ignore_case,
        results.len()
    );
    Ok(results)
}
