//! Available subcommands.

use beatfetch_core::BeatmapSetId;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog and print one page of results
    Search {
        /// Search text
        query: String,
        /// Page to show (1-based)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// Include unranked sets
        #[arg(long)]
        unranked: bool,
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download beatmap sets by catalog id
    Download {
        /// Catalog ids of the sets
        #[arg(required = true)]
        ids: Vec<BeatmapSetId>,
    },
}
