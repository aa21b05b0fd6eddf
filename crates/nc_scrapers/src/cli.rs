use clap::{Args, Subcommand};
use nc_core::Result;

use crate::ingest::IngestionDriver;
use crate::manager::{ScraperManager, SourceFailurePolicy};

#[derive(Args, Debug)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: ScraperCommands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ScraperCommands {
    /// Harvest the news portals and index articles not seen before
    Collect {
        /// Restrict the run to one portal (e.g. index, hirado, origo)
        #[arg(long)]
        source: Option<String>,

        /// What to do when a portal's listing page cannot be fetched
        #[arg(long, value_enum, default_value_t = SourceFailurePolicy::Continue)]
        on_source_failure: SourceFailurePolicy,

        /// Scrape all portals at the same time
        #[arg(long)]
        concurrent: bool,
    },
    /// List available scrapers
    List,
}

pub async fn handle_command(
    command: ScraperCommands,
    mut manager: ScraperManager,
    driver: &IngestionDriver,
) -> Result<()> {
    match command {
        ScraperCommands::Collect {
            source,
            on_source_failure,
            concurrent,
        } => {
            if let Some(source) = source {
                manager.retain_source(&source)?;
            }
            let manager = manager
                .with_policy(on_source_failure)
                .with_concurrency(concurrent);

            let report = driver.run(&manager).await?;
            for failure in &report.harvest_failures {
                eprintln!("❌ {}: {}", failure.source, failure.error);
            }
            println!(
                "🆕 {} added, ⏭️ {} already indexed, ⚠️ {} failed",
                report.ingest.added, report.ingest.skipped, report.ingest.failed
            );
        }
        ScraperCommands::List => {
            println!("Available scrapers:");
            manager.list_scrapers();
        }
    }
    Ok(())
}
