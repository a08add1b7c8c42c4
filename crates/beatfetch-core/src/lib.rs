//! Core domain types and port definitions for beatfetch.
//!
//! This crate holds everything the search/download orchestrator shares with
//! its adapters: catalog entries, the published pagination snapshot, the
//! download lifecycle, settings, and the port traits adapters implement.
//! It performs no I/O.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod download;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    BeatmapSetId, PageCommit, PageDirection, PaginationState, SearchResult, SearchStatus,
};
pub use download::{
    AddOutcome, DownloadError, DownloadProgress, DownloadResult, DownloadStatus, JobAction,
};
pub use ports::{
    CatalogError, CatalogPort, CatalogResult, DownloadExecutorPort, ExecutorEvent, ExecutorHandle,
    ExecutorRequest, ExecutorUpdate, ExecutorUpdateReceiver, ExecutorUpdateSender, ImportError,
    ImportReport, LibraryPort, NoopLibrary, NoopPreviewPlayer, PreviewError, PreviewPlayerPort,
    SearchPage, SearchRequest, executor_channel,
};
pub use settings::{
    DEFAULT_FOCUS_DELAY_MS, DEFAULT_MIN_REQUEST_INTERVAL_MS, DEFAULT_SEARCH_DELAY_MS,
    PublishStrategy, SessionSettings, SettingsError, validate_settings,
};
