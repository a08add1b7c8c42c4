//! Search handler.
//!
//! Drives a [`Session`] the way an interactive front end would: set the
//! query, tick frames until the search settles, then page forward.

use std::time::Duration;

use beatfetch_core::{PaginationState, SessionSettings};
use beatfetch_session::{Session, SessionEvent};
use tokio::time::{Instant, MissedTickBehavior};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_results;

const FRAME: Duration = Duration::from_millis(16);
const SETTLE_TIMEOUT: Duration = Duration::from_secs(45);

/// Arguments for the search command.
pub struct SearchArgs {
    pub query: String,
    pub page: u32,
    pub unranked: bool,
    pub json: bool,
}

/// Execute the search command.
pub async fn execute(ctx: &CliContext, args: SearchArgs) -> Result<(), CliError> {
    let settings = SessionSettings::default().with_ranked_only(!args.unranked);
    let mut session = ctx.session(settings)?;

    session.handle(SessionEvent::QueryTextChanged(args.query.clone()))?;
    session.handle(SessionEvent::ExplicitSearch)?;
    settle(&mut session).await?;

    for _ in 1..args.page {
        let state = session.pagination();
        check_status(&state)?;
        if !state.can_page_next() {
            return Err(CliError::Arguments(format!(
                "page {} is past the last page ({})",
                args.page, state.page
            )));
        }
        session.handle(SessionEvent::PageNext)?;
        settle(&mut session).await?;
    }

    let state = session.pagination();
    check_status(&state)?;

    if args.json {
        print_json(&state)?;
    } else {
        print_results(&state);
    }
    Ok(())
}

/// Tick frames until a new search has been dispatched and has finished.
async fn settle(session: &mut Session) -> Result<(), CliError> {
    let deadline = Instant::now() + SETTLE_TIMEOUT;
    let before = session.searches_dispatched();
    let mut frames = tokio::time::interval(FRAME);
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        frames.tick().await;
        session.tick(FRAME);
        let dispatched = session.searches_dispatched();
        if dispatched > before && session.searches_settled() == dispatched {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(CliError::Catalog(
                "timed out waiting for the catalog".to_string(),
            ));
        }
    }
}

fn check_status(state: &PaginationState) -> Result<(), CliError> {
    if state.status.is_error() {
        return Err(CliError::Catalog(state.status.to_string()));
    }
    Ok(())
}

fn print_json(state: &PaginationState) -> Result<(), CliError> {
    let value = serde_json::json!({
        "query": state.query,
        "page": state.page,
        "total_results": state.total_results,
        "results_seen": state.results_seen,
        "status": state.status.to_string(),
        "results": &*state.results,
    });
    let text = serde_json::to_string_pretty(&value)
        .map_err(|e| CliError::Io(format!("failed to encode results: {e}")))?;
    println!("{text}");
    Ok(())
}
