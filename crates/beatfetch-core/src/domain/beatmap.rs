//! Catalog entry types.
//!
//! Pure data produced by the catalog service. Nothing here is mutated after
//! construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable catalog identifier of a beatmap set.
///
/// This is the key used for download deduplication and preview tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeatmapSetId(u32);

impl BeatmapSetId {
    /// Create an identifier from its raw catalog value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw catalog value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// File name used for the downloaded archive.
    #[must_use]
    pub fn archive_name(self) -> String {
        format!("{}.osz", self.0)
    }
}

impl fmt::Display for BeatmapSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BeatmapSetId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u32> for BeatmapSetId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// One entry of a catalog search page.
///
/// The display fields are opaque to the orchestrator; only `id` and
/// `preview_url` are interpreted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Catalog identifier.
    pub id: BeatmapSetId,
    /// Song title (romanized).
    pub title: String,
    /// Song title in its original script, if the catalog has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_unicode: Option<String>,
    /// Song artist (romanized).
    pub artist: String,
    /// Song artist in its original script, if the catalog has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_unicode: Option<String>,
    /// Mapper who created the set.
    pub creator: String,
    /// Last update date as reported by the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Audio preview location.
    pub preview_url: String,
}

impl SearchResult {
    /// Create a result with the required fields; optional metadata is empty.
    pub fn new(
        id: BeatmapSetId,
        title: impl Into<String>,
        artist: impl Into<String>,
        creator: impl Into<String>,
        preview_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            title_unicode: None,
            artist: artist.into(),
            artist_unicode: None,
            creator: creator.into(),
            date: None,
            preview_url: preview_url.into(),
        }
    }

    /// Human-readable "Artist - Title" label.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}
