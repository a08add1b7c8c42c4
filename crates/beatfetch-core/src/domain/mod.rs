//! Search domain types.
//!
//! - `beatmap` - catalog identifiers and search result entries
//! - `pagination` - the published query/page/result snapshot

pub mod beatmap;
pub mod pagination;

pub use beatmap::{BeatmapSetId, SearchResult};
pub use pagination::{PageCommit, PageDirection, PaginationState, SearchStatus};
