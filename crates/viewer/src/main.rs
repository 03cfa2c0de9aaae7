//! Paperdeck terminal viewer
//!
//! Interactive browsing client over the static data tree. Loads the date
//! catalog once at startup, then maps typed commands onto the core's
//! selection state machine and prints each committed render.

mod render;
mod repl;

use paperdeck_browse::{Command, Coordinator, DataSource, FsDataSource, HttpDataSource};
use paperdeck_common::{AppConfig, BrowseError, VERSION};
use repl::ReplAction;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("configuration: {e}"))?;

    // Initialize tracing; keep stdout clean for the cards
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting paperdeck viewer v{}", VERSION);

    let base = config.source.base.clone();

    // Relative-path fetches cannot work for a tree opened straight from
    // disk via file://; refuse before touching the network.
    if base.starts_with("file://") {
        eprintln!(
            "Cannot browse a file:// URL. Serve the data tree over local HTTP instead,\n\
             e.g. run the bundled `server` binary and point APP__SOURCE__BASE at it\n\
             (default: http://127.0.0.1:8077/data)."
        );
        std::process::exit(2);
    }

    let source: Arc<dyn DataSource> = if base.starts_with("http://") || base.starts_with("https://")
    {
        Arc::new(HttpDataSource::new(&base, config.fetch_timeout())?)
    } else {
        Arc::new(FsDataSource::new(base.as_str()))
    };

    // Fatal when the index cannot be loaded; a full message, not a crash
    let catalog = match source.fetch_catalog().await {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("Failed to load the date catalog from {base}: {err}");
            std::process::exit(1);
        }
    };

    if catalog.is_empty() {
        println!("No data yet. Run the crawl pipeline first, then retry.");
        return Ok(());
    }

    let coordinator = Coordinator::new(source, catalog);

    println!("paperdeck v{VERSION} - {} dates available, type 'help' for commands", coordinator.catalog().len());

    // Initial render: newest date, no filter
    coordinator.refresh().await;
    render::print_view(&coordinator.view());

    run_repl(&coordinator).await
}

async fn run_repl(coordinator: &Coordinator<Arc<dyn DataSource>>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match repl::parse_line(&line) {
            Ok(ReplAction::Apply(command)) => {
                // an unlisted date is accepted and renders empty; say why
                if let Command::SelectDate(date) = &command {
                    if !coordinator.catalog().contains(*date) {
                        eprintln!("{date} is not in the catalog, see 'dates'");
                    }
                }
                coordinator.apply(command).await;
                render::print_view(&coordinator.view());
            }
            Ok(ReplAction::ListDates) => render::print_dates(coordinator.catalog()),
            Ok(ReplAction::Help) => println!("{}", repl::HELP),
            Ok(ReplAction::Quit) => break,
            Ok(ReplAction::Noop) => {}
            Err(err @ BrowseError::InvalidDate { .. }) => {
                eprintln!("{err} (expected YYYY-MM-DD)");
            }
            Err(err) => eprintln!("{err}"),
        }
    }

    Ok(())
}
