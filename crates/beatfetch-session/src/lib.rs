//! Search and download session for beatfetch.
//!
//! - `debouncer` - turns typing and explicit requests into search triggers
//! - `coordinator` - dispatches searches and gates their publication
//! - `preview` - single active audio preview
//! - `import` - interruptible bulk library import
//! - `view` - list selection and scrolling
//! - `session` - the orchestrator the presentation layer drives
#![deny(unused_crate_dependencies)]

pub mod coordinator;
pub mod debouncer;
pub mod import;
pub mod preview;
mod session;
pub mod view;

#[cfg(test)]
mod testing;

pub use coordinator::{QueryCoordinator, SearchOutcome, normalize_query};
pub use debouncer::SearchDebouncer;
pub use import::{ImportOutcome, ImportTask};
pub use preview::{BAD_URL_NOTICE, LOAD_FAILED_NOTICE, PreviewController, PreviewToggle};
pub use session::{Session, SessionDeps, SessionEvent, build_session};
pub use view::{ClickAction, ListWindow, ResultFocus};
