//! Cache of filtered, ranked results per full query.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use fnv::FnvHashMap;

use super::lookup::RawLookupCache;
use super::rank::rank_by_path;
use crate::backend::LocateBackend;
use crate::error::Result;
use crate::paths::{is_hidden, HomeLayout};
use crate::pool::PathPool;
use crate::query::{filter_query, refilter_query, CompiledQuery, FilteredStatus, Query};
use crate::types::IconKind;

#[derive(Debug, Clone)]
pub struct RankedItem {
    pub path: Arc<str>,
    pub icon_kind: IconKind,
}

/// Ranked results of one query.
///
/// `items` stays sorted: re-validation only removes. `max_length` is the
/// number of raw candidates the entry was built from, so it never drops
/// below `items.len()`.
#[derive(Debug, Clone)]
pub struct RankedEntry {
    items: Vec<RankedItem>,
    max_length: usize,
    last_checked: u64,
}

impl RankedEntry {
    pub fn items(&self) -> &[RankedItem] {
        &self.items
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn last_checked(&self) -> u64 {
        self.last_checked
    }

    /// Linear decay from `scale` at rank 0, keeping list order as relevance order.
    pub fn relevance(&self, rank: usize, scale: f64) -> f64 {
        if self.max_length == 0 {
            return 0.0;
        }
        scale * (1.0 - rank as f64 / self.max_length as f64)
    }

    fn build(query: &Query, candidates: &[Arc<str>], layout: &HomeLayout, now: u64) -> Self {
        let compiled = CompiledQuery::new(query.clone());
        let mut items = candidates
            .iter()
            .filter_map(|path| {
                let icon_kind = match filter_query(path, &compiled) {
                    FilteredStatus::Rejected => return None,
                    _ if is_hidden(path) => IconKind::Hidden,
                    FilteredStatus::Directory => IconKind::Directory,
                    FilteredStatus::Regular => IconKind::Regular,
                };
                Some(RankedItem {
                    path: path.clone(),
                    icon_kind,
                })
            })
            .collect::<Vec<_>>();
        rank_by_path(&mut items, layout, |item| &*item.path);

        Self {
            items,
            max_length: candidates.len(),
            last_checked: now,
        }
    }

    /// Drops items that vanished or changed type. No re-matching, no re-sorting.
    fn revalidate(&mut self, query: &Query, now: u64) {
        let before = self.items.len();
        self.items
            .retain(|item| refilter_query(&item.path, query).is_accepted());
        self.last_checked = now;
        if self.items.len() != before {
            log::debug!(
                "revalidated {:?}: dropped {} of {} results",
                query.pattern(),
                before - self.items.len(),
                before
            );
        }
    }
}

#[derive(Debug)]
pub struct RankedQueryCache {
    entries: FnvHashMap<Query, RankedEntry>,
    staleness_interval: u64,
}

impl RankedQueryCache {
    pub fn new(staleness_interval: u64) -> Self {
        Self {
            entries: FnvHashMap::default(),
            staleness_interval,
        }
    }

    /// Returns the ranked entry for `query`, building it on a miss and
    /// re-validating it when it was last checked more than the staleness
    /// interval ago.
    pub fn resolve(
        &mut self,
        query: Query,
        now: u64,
        lookups: &mut RawLookupCache,
        backend: &dyn LocateBackend,
        layout: &HomeLayout,
        pool: &mut PathPool,
    ) -> Result<&RankedEntry> {
        let interval = self.staleness_interval;
        match self.entries.entry(query) {
            Entry::Occupied(mut occupied) => {
                if now.saturating_sub(occupied.get().last_checked) > interval {
                    let query = occupied.key().clone();
                    occupied.get_mut().revalidate(&query, now);
                }
                Ok(occupied.into_mut())
            }
            Entry::Vacant(vacant) => {
                let candidates =
                    lookups.get_or_fetch(&vacant.key().locate_query, backend, layout, pool)?;
                let entry = RankedEntry::build(vacant.key(), candidates, layout, now);
                log::debug!(
                    "ranked {:?}: {} of {} candidates kept",
                    vacant.key().pattern(),
                    entry.items.len(),
                    entry.max_length
                );
                Ok(vacant.insert(entry))
            }
        }
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
