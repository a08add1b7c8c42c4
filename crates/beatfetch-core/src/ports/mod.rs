//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the orchestrator expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No HTTP, filesystem or audio types in any signature
//! - Long-running operations are plain futures; callers cancel by dropping
//! - Background progress flows through channels, never shared mutation

pub mod catalog;
pub mod download_executor;
pub mod library;
pub mod preview;

pub use catalog::{CatalogError, CatalogPort, CatalogResult, SearchPage, SearchRequest};
pub use download_executor::{
    DownloadExecutorPort, ExecutorEvent, ExecutorHandle, ExecutorRequest, ExecutorUpdate,
    ExecutorUpdateReceiver, ExecutorUpdateSender, executor_channel,
};
pub use library::{ImportError, ImportReport, LibraryPort, NoopLibrary};
pub use preview::{NoopPreviewPlayer, PreviewError, PreviewPlayerPort};
