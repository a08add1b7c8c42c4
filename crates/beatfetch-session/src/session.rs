//! The orchestrator the presentation layer drives.
//!
//! A [`Session`] is owned by the foreground loop. Discrete input goes
//! through [`Session::handle`]; [`Session::tick`] runs once per frame to
//! advance timers, collect background results and fire searches. Neither
//! call blocks on network or disk.

use std::sync::Arc;
use std::time::Duration;

use beatfetch_core::{
    BeatmapSetId, CatalogPort, DownloadExecutorPort, DownloadResult, DownloadStatus,
    ExecutorUpdateReceiver, LibraryPort, PageDirection, PaginationState, PreviewPlayerPort,
    SessionSettings, SettingsError, validate_settings,
};
use beatfetch_download::{
    DownloadManager, DownloadManagerDeps, DownloadQueue, build_download_manager,
};
use tokio::sync::watch;

use crate::coordinator::QueryCoordinator;
use crate::debouncer::SearchDebouncer;
use crate::import::{ImportOutcome, ImportTask};
use crate::preview::{BAD_URL_NOTICE, PreviewController};
use crate::view::{ClickAction, ListWindow, ResultFocus};

/// Discrete input from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The search field now holds this text.
    QueryTextChanged(String),
    /// Enter in the search field.
    ExplicitSearch,
    /// Escape in the search field: clear the text and search again.
    ClearSearch,
    /// Reset button: clear the text and search again even if it was empty.
    ResetSearch,
    /// Re-fetch the page currently shown.
    Refresh,
    PagePrevious,
    PageNext,
    /// Flip the ranked-only filter.
    ToggleRanked,
    /// Click on the result row at this index of the current page.
    ResultClicked(usize),
    DownloadRequest(BeatmapSetId),
    CancelRequest(BeatmapSetId),
    RemoveDownload(BeatmapSetId),
    /// Evict every job with this terminal status.
    ClearTerminalDownloads(DownloadStatus),
    /// Evict every terminal job.
    ClearInactiveDownloads,
    PreviewToggle(BeatmapSetId),
    StartImport,
    InterruptImport,
    /// Scroll the result list by this many rows.
    ScrollResults(i32),
    /// Scroll the download list by this many rows.
    ScrollDownloads(i32),
}

/// Adapters a session runs against.
pub struct SessionDeps {
    pub catalog: Arc<dyn CatalogPort>,
    pub executor: Arc<dyn DownloadExecutorPort>,
    /// Receiving half of the channel `executor` reports on.
    pub updates: ExecutorUpdateReceiver,
    pub player: Arc<dyn PreviewPlayerPort>,
    pub library: Arc<dyn LibraryPort>,
}

/// Build a session after validating `settings`.
pub fn build_session(
    settings: SessionSettings,
    deps: SessionDeps,
) -> Result<Session, SettingsError> {
    validate_settings(&settings)?;

    let downloads = build_download_manager(DownloadManagerDeps {
        catalog: Arc::clone(&deps.catalog),
        executor: deps.executor,
        updates: deps.updates,
    });

    Ok(Session {
        debouncer: SearchDebouncer::new(settings.search_delay(), settings.min_request_interval()),
        coordinator: QueryCoordinator::new(Arc::clone(&deps.catalog), settings.publish_strategy),
        downloads,
        preview: PreviewController::new(deps.player),
        import: None,
        catalog: deps.catalog,
        library: deps.library,
        query_text: String::new(),
        ranked_only: settings.ranked_only,
        focus: ResultFocus::new(settings.focus_delay()),
        results_window: ListWindow::new(settings.results_per_view),
        downloads_window: ListWindow::new(settings.downloads_per_view),
        seen_revision: 0,
        notices: Vec::new(),
    })
}

/// Search, download, preview and import state for one screen.
pub struct Session {
    debouncer: SearchDebouncer,
    coordinator: QueryCoordinator,
    downloads: DownloadManager,
    preview: PreviewController,
    import: Option<ImportTask>,
    catalog: Arc<dyn CatalogPort>,
    library: Arc<dyn LibraryPort>,
    query_text: String,
    ranked_only: bool,
    focus: ResultFocus,
    results_window: ListWindow,
    downloads_window: ListWindow,
    seen_revision: u64,
    notices: Vec<String>,
}

impl Session {
    /// Apply one input event.
    ///
    /// While an import runs every event except [`SessionEvent::InterruptImport`]
    /// is ignored. Only download commands can fail; a rejected command
    /// leaves the queue unchanged.
    pub fn handle(&mut self, event: SessionEvent) -> DownloadResult<()> {
        if let Some(import) = &self.import {
            match event {
                SessionEvent::InterruptImport => import.interrupt(),
                other => tracing::debug!(event = ?other, "input ignored during import"),
            }
            return Ok(());
        }

        match event {
            SessionEvent::QueryTextChanged(text) => {
                self.query_text = text;
                self.debouncer.on_query_text_changed();
                self.coordinator.set_page_direction(PageDirection::Reset);
            }
            SessionEvent::ExplicitSearch => {
                if !self.query_text.is_empty() {
                    self.schedule(PageDirection::Reset);
                }
            }
            SessionEvent::ClearSearch => {
                if !self.query_text.is_empty() {
                    self.query_text.clear();
                    self.schedule(PageDirection::Reset);
                }
            }
            SessionEvent::ResetSearch => {
                self.query_text.clear();
                self.coordinator.force_refire();
                self.schedule(PageDirection::Reset);
            }
            SessionEvent::Refresh => {
                self.coordinator.force_refire();
                self.schedule(PageDirection::Current);
            }
            SessionEvent::PagePrevious => self.page(PageDirection::Previous),
            SessionEvent::PageNext => self.page(PageDirection::Next),
            SessionEvent::ToggleRanked => {
                self.ranked_only = !self.ranked_only;
                self.coordinator.force_refire();
                self.schedule(PageDirection::Reset);
            }
            SessionEvent::ResultClicked(index) => return self.click_result(index),
            SessionEvent::DownloadRequest(id) => return self.request_download(id),
            SessionEvent::CancelRequest(id) => return self.downloads.cancel(id),
            SessionEvent::RemoveDownload(id) => {
                self.downloads.remove(id)?;
                self.clamp_downloads();
            }
            SessionEvent::ClearTerminalDownloads(status) => {
                self.downloads.clear_terminal(status);
                self.clamp_downloads();
            }
            SessionEvent::ClearInactiveDownloads => {
                self.downloads.clear_inactive();
                self.clamp_downloads();
            }
            SessionEvent::PreviewToggle(id) => self.toggle_preview(id),
            SessionEvent::StartImport => {
                self.import = Some(ImportTask::spawn(Arc::clone(&self.library)));
            }
            SessionEvent::InterruptImport => {}
            SessionEvent::ScrollResults(delta) => {
                let len = self.coordinator.with_state(|state| state.results.len());
                self.results_window.scroll(delta, len);
            }
            SessionEvent::ScrollDownloads(delta) => {
                self.downloads_window.scroll(delta, self.downloads.queue().len());
            }
        }
        Ok(())
    }

    /// Advance by one frame of `dt`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn tick(&mut self, dt: Duration) {
        self.focus.tick(dt);
        self.downloads.poll();
        let notices = self.preview.poll();
        self.notices.extend(notices);
        self.poll_import();

        let revision = self.coordinator.revision();
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.focus.clear();
            self.results_window.reset();
        }
        self.clamp_downloads();

        if self.debouncer.tick(dt, self.import.is_some()) {
            // Detached; the coordinator publishes when it completes.
            let _ = self.coordinator.on_trigger(&self.query_text, self.ranked_only);
        }
    }

    /// Copy of the published search state.
    pub fn pagination(&self) -> PaginationState {
        self.coordinator.snapshot()
    }

    /// Receiver that observes every published search state.
    pub fn subscribe(&self) -> watch::Receiver<PaginationState> {
        self.coordinator.subscribe()
    }

    pub const fn downloads(&self) -> &DownloadQueue {
        self.downloads.queue()
    }

    pub fn previewing(&self) -> Option<BeatmapSetId> {
        self.preview.previewing()
    }

    pub const fn focused_result(&self) -> Option<usize> {
        self.focus.focused()
    }

    pub const fn result_offset(&self) -> usize {
        self.results_window.offset()
    }

    pub const fn download_offset(&self) -> usize {
        self.downloads_window.offset()
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub const fn ranked_only(&self) -> bool {
        self.ranked_only
    }

    pub const fn is_importing(&self) -> bool {
        self.import.is_some()
    }

    pub fn is_searching(&self) -> bool {
        self.coordinator.is_searching()
    }

    /// Number of searches dispatched since the session was built.
    pub fn searches_dispatched(&self) -> u64 {
        self.coordinator.dispatched()
    }

    /// Number of dispatched searches whose results, if any, are published.
    pub fn searches_settled(&self) -> u64 {
        self.coordinator.settled()
    }

    /// Drain notices queued for the user.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    fn schedule(&mut self, direction: PageDirection) {
        self.coordinator.set_page_direction(direction);
        self.debouncer.on_explicit_trigger();
    }

    fn page(&mut self, direction: PageDirection) {
        let allowed = self.coordinator.with_state(|state| match direction {
            PageDirection::Previous => state.can_page_previous(),
            PageDirection::Next => state.can_page_next(),
            PageDirection::Reset | PageDirection::Current => true,
        });
        if !allowed || self.coordinator.page_action_blocked(direction) {
            tracing::debug!(?direction, "page action ignored");
            return;
        }
        self.coordinator.force_refire();
        self.schedule(direction);
    }

    fn click_result(&mut self, index: usize) -> DownloadResult<()> {
        let Some((id, label)) = self.coordinator.with_state(|state| {
            state
                .results
                .get(index)
                .map(|result| (result.id, result.display_name()))
        }) else {
            return Ok(());
        };
        if self.library.contains(id) {
            return Ok(());
        }

        if self.focus.click(index) == ClickAction::Activate {
            self.downloads.request(id, &label)?;
        }
        Ok(())
    }

    fn request_download(&mut self, id: BeatmapSetId) -> DownloadResult<()> {
        if self.library.contains(id) {
            tracing::debug!(%id, "already in library");
            return Ok(());
        }
        let label = self.coordinator.with_state(|state| {
            state
                .results
                .iter()
                .find(|result| result.id == id)
                .map(beatfetch_core::SearchResult::display_name)
        });
        let label = label.unwrap_or_else(|| id.to_string());
        self.downloads.request(id, &label)?;
        Ok(())
    }

    fn toggle_preview(&mut self, id: BeatmapSetId) {
        let index = self
            .coordinator
            .with_state(|state| state.results.iter().position(|result| result.id == id));
        if let Some(index) = index
            && !self.library.contains(id)
        {
            self.focus.focus_expired(index);
        }

        if self.preview.previewing() == Some(id) {
            self.preview.stop();
            return;
        }
        match self.catalog.preview_url(id) {
            Ok(url) => {
                self.preview.toggle(id, url);
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "cannot resolve preview");
                self.notices.push(BAD_URL_NOTICE.to_string());
            }
        }
    }

    fn poll_import(&mut self) {
        let Some(outcome) = self.import.as_mut().and_then(ImportTask::try_finish) else {
            return;
        };
        self.import = None;

        if let ImportOutcome::Finished(report) = outcome
            && let Some(notice) = report.notice()
        {
            self.preview.stop();
            self.notices.push(notice);
        }
        self.downloads.clear_terminal(DownloadStatus::Complete);
    }

    fn clamp_downloads(&mut self) {
        self.downloads_window.clamp(self.downloads.queue().len());
    }
}
