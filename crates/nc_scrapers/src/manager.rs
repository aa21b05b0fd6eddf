use clap::ValueEnum;
use futures::future::join_all;
use nc_core::{Article, Error, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::fetch::PageFetcher;
use crate::scrapers::{hungary, Scraper};

/// What a harvest does when one portal cannot be scraped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SourceFailurePolicy {
    /// Record the failure and keep harvesting the remaining portals
    #[default]
    Continue,
    /// Stop at the first failing portal
    Abort,
}

#[derive(Debug)]
pub struct SourceFailure {
    pub source: &'static str,
    pub error: Error,
}

/// Articles of every portal that succeeded, in registration order, plus the
/// portals that did not. Each address appears at most once.
#[derive(Debug, Default)]
pub struct HarvestReport {
    pub articles: Vec<Article>,
    pub failures: Vec<SourceFailure>,
}

impl HarvestReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct ScraperManager {
    fetcher: Arc<dyn PageFetcher>,
    scrapers: Vec<Box<dyn Scraper>>,
    policy: SourceFailurePolicy,
    concurrent: bool,
}

impl ScraperManager {
    /// A manager with no portals registered.
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            scrapers: Vec::new(),
            policy: SourceFailurePolicy::default(),
            concurrent: false,
        }
    }

    /// Index.hu, Hirado.hu and Origo.hu, in that order.
    pub fn with_default_scrapers(fetcher: Arc<dyn PageFetcher>) -> Self {
        let mut manager = Self::new(fetcher);
        for scraper in hungary::get_scrapers() {
            manager.add_scraper(scraper);
        }
        manager
    }

    pub fn with_policy(mut self, policy: SourceFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Scrape all portals at once. Results are still merged in registration
    /// order.
    pub fn with_concurrency(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    pub fn add_scraper(&mut self, scraper: Box<dyn Scraper>) {
        self.scrapers.push(scraper);
    }

    pub fn scrapers(&self) -> &[Box<dyn Scraper>] {
        &self.scrapers
    }

    pub fn get_scraper_for_url(&self, url: &str) -> Result<&dyn Scraper> {
        self.scrapers
            .iter()
            .find(|s| s.can_handle(url))
            .map(|s| s.as_ref())
            .ok_or_else(|| Error::Config(format!("No scraper found for URL: {}", url)))
    }

    fn matches_name(scraper: &dyn Scraper, wanted: &str) -> bool {
        scraper.source_metadata().name.to_lowercase() == wanted
            || scraper.cli_names().iter().any(|n| n.to_lowercase() == wanted)
    }

    /// Finds a portal by display name or CLI name (case-insensitive).
    pub fn get_scraper_by_name(&self, name: &str) -> Result<&dyn Scraper> {
        let wanted = name.to_lowercase();
        self.scrapers
            .iter()
            .map(|s| s.as_ref())
            .find(|s| Self::matches_name(*s, &wanted))
            .ok_or_else(|| Error::Config(format!("Unknown source: {}", name)))
    }

    /// Keeps only the portal matching `name`.
    pub fn retain_source(&mut self, name: &str) -> Result<()> {
        self.get_scraper_by_name(name)?;
        let wanted = name.to_lowercase();
        self.scrapers.retain(|s| Self::matches_name(s.as_ref(), &wanted));
        Ok(())
    }

    /// Harvests every registered portal. Under `Abort` the first failing
    /// portal's error is returned instead of a report.
    pub async fn get_articles_from_news_portals(&self) -> Result<HarvestReport> {
        let outcomes = if self.concurrent {
            join_all(
                self.scrapers
                    .iter()
                    .map(|scraper| scraper.get_articles(self.fetcher.as_ref())),
            )
            .await
        } else {
            let mut outcomes = Vec::with_capacity(self.scrapers.len());
            for scraper in &self.scrapers {
                let outcome = scraper.get_articles(self.fetcher.as_ref()).await;
                let failed = outcome.is_err();
                outcomes.push(outcome);
                if failed && self.policy == SourceFailurePolicy::Abort {
                    break;
                }
            }
            outcomes
        };

        self.merge(outcomes)
    }

    /// The first occurrence of an address wins, so a later duplicate never
    /// reaches ingestion within the same harvest.
    fn merge(&self, outcomes: Vec<Result<Vec<Article>>>) -> Result<HarvestReport> {
        let mut report = HarvestReport::default();
        let mut seen = HashSet::new();
        for (scraper, outcome) in self.scrapers.iter().zip(outcomes) {
            let source = scraper.source_metadata().name;
            match outcome {
                Ok(articles) => {
                    info!(source, count = articles.len(), "Portal harvested");
                    for article in articles {
                        if !seen.insert(article.address.clone()) {
                            debug!(source, address = %article.address, "Dropping duplicate address");
                            continue;
                        }
                        report.articles.push(article);
                    }
                }
                Err(error) => {
                    warn!(source, %error, "Portal harvest failed");
                    if self.policy == SourceFailurePolicy::Abort {
                        return Err(error);
                    }
                    report.failures.push(SourceFailure { source, error });
                }
            }
        }
        Ok(report)
    }

    pub fn list_scrapers(&self) {
        for scraper in &self.scrapers {
            let metadata = scraper.source_metadata();
            println!(
                "{} {} {} ({})",
                metadata.region.emoji,
                metadata.emoji,
                metadata.name,
                scraper.cli_names().join(", ")
            );
        }
    }
}
