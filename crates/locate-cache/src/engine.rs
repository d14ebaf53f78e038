//! The query engine: all cache state behind one context object.

use parking_lot::Mutex;

use crate::backend::{CommandBackend, LocateBackend};
use crate::cache::{RawLookupCache, RankedQueryCache};
use crate::config::LocateConfig;
use crate::error::Result;
use crate::paths::{split_dir_base, HomeLayout};
use crate::pool::PathPool;
use crate::query::parse_query;
use crate::staleness::{unix_now_secs, StalenessClock};
use crate::types::QueryMatch;

/// Sizes of the engine's tables, mostly for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub raw_lookups: usize,
    pub ranked_queries: usize,
    pub pooled_paths: usize,
}

impl CacheStats {
    pub fn is_empty(&self) -> bool {
        self.raw_lookups == 0 && self.ranked_queries == 0 && self.pooled_paths == 0
    }
}

/// Caching, ranking front of a locate backend.
///
/// Starts empty, fills per query and is fully reset when the index database
/// changes. Not thread safe on its own; see [`SharedLocateEngine`].
#[derive(Debug)]
pub struct LocateEngine<B = CommandBackend> {
    backend: B,
    layout: HomeLayout,
    relevance_scale: f64,
    clock: StalenessClock,
    lookups: RawLookupCache,
    ranked: RankedQueryCache,
    pool: PathPool,
}

impl LocateEngine<CommandBackend> {
    pub fn from_config(config: &LocateConfig) -> Self {
        Self::with_backend(CommandBackend::new(config), config)
    }
}

impl<B: LocateBackend> LocateEngine<B> {
    pub fn with_backend(backend: B, config: &LocateConfig) -> Self {
        let home = config.resolved_home();
        Self {
            backend,
            layout: HomeLayout::new(home.as_deref(), &config.excluded_subdirs),
            relevance_scale: config.relevance_scale,
            clock: StalenessClock::new(config.staleness_interval_secs),
            lookups: RawLookupCache::new(),
            ranked: RankedQueryCache::new(config.staleness_interval_secs),
            pool: PathPool::new(),
        }
    }

    /// Answers one query at time `now` (unix seconds).
    ///
    /// The returned list is ordered by descending relevance. An empty pattern
    /// yields no results without touching the caches.
    pub fn query(&mut self, raw_text: &str, now: u64) -> Result<Vec<QueryMatch>> {
        if self.clock.check(now, || self.backend.database_mtime()) {
            log::info!("locate database changed, clearing caches");
            self.clear_caches();
        }

        let query = parse_query(raw_text);
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let entry = self.ranked.resolve(
            query,
            now,
            &mut self.lookups,
            &self.backend,
            &self.layout,
            &mut self.pool,
        )?;

        let matches = entry
            .items()
            .iter()
            .enumerate()
            .map(|(rank, item)| {
                let (_, base_name) = split_dir_base(&item.path);
                QueryMatch {
                    path: item.path.clone(),
                    kind: item.icon_kind,
                    relevance: entry.relevance(rank, self.relevance_scale),
                    base_name: base_name.to_string(),
                    display_dir: self.layout.display_dir(&item.path).into_owned(),
                }
            })
            .collect::<Vec<_>>();
        log::debug!("query {raw_text:?} -> {} results", matches.len());
        Ok(matches)
    }

    /// [`Self::query`] at the current wall-clock time.
    pub fn query_now(&mut self, raw_text: &str) -> Result<Vec<QueryMatch>> {
        self.query(raw_text, unix_now_secs())
    }

    /// Drops every cached lookup, ranked result and pooled path.
    pub fn clear_caches(&mut self) {
        self.ranked.clear();
        self.lookups.clear();
        self.pool.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            raw_lookups: self.lookups.len(),
            ranked_queries: self.ranked.len(),
            pooled_paths: self.pool.len(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn layout(&self) -> &HomeLayout {
        &self.layout
    }
}

/// A [`LocateEngine`] behind one mutex, for hosts that query from several threads.
#[derive(Debug)]
pub struct SharedLocateEngine<B = CommandBackend> {
    inner: Mutex<LocateEngine<B>>,
}

impl<B: LocateBackend> SharedLocateEngine<B> {
    pub fn new(engine: LocateEngine<B>) -> Self {
        Self {
            inner: Mutex::new(engine),
        }
    }

    pub fn query(&self, raw_text: &str, now: u64) -> Result<Vec<QueryMatch>> {
        self.inner.lock().query(raw_text, now)
    }

    pub fn query_now(&self, raw_text: &str) -> Result<Vec<QueryMatch>> {
        self.inner.lock().query_now(raw_text)
    }

    pub fn clear_caches(&self) {
        self.inner.lock().clear_caches();
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }
}
