//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via
//! bootstrap. Command dispatch routes to handlers.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use beatfetch_cli::handlers::search::SearchArgs;
use beatfetch_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, command: Commands) -> Result<(), CliError> {
    let ctx = bootstrap(CliConfig {
        catalog_url: cli.catalog_url,
        download_dir: cli.download_dir,
    })?;

    match command {
        Commands::Search {
            query,
            page,
            unranked,
            json,
        } => {
            let args = SearchArgs {
                query,
                page,
                unranked,
                json,
            };
            handlers::search::execute(&ctx, args).await
        }
        Commands::Download { ids } => handlers::download::execute(&ctx, &ids).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads env fallbacks
    dotenvy::dotenv().ok();

    let mut cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command.take() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Err(err) = run(cli, command).await {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
    Ok(())
}
