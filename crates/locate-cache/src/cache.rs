//! The two cache levels and the ranking order.

mod lookup;
mod rank;
mod ranked;

pub use lookup::RawLookupCache;
pub use rank::{compare_paths, rank_by_path, RankKey};
pub use ranked::{RankedEntry, RankedItem, RankedQueryCache};
