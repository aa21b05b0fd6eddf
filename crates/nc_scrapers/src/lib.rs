pub mod cli;
pub mod fetch;
pub mod ingest;
mod logging;
pub mod manager;
pub mod scrapers;

pub use cli::{handle_command, ScraperArgs, ScraperCommands};
pub use fetch::{HttpFetcher, PageFetcher};
pub use ingest::{ArticleStatus, IngestReport, IngestionDriver, RunReport};
pub use manager::{HarvestReport, ScraperManager, SourceFailure, SourceFailurePolicy};
pub use scrapers::Scraper;

pub mod prelude {
    pub use super::scrapers::Scraper;
    pub use nc_core::{Article, Error, Result};
}
