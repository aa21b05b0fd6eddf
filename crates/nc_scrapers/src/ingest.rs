use nc_core::{Article, ArticleIndex, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::manager::{ScraperManager, SourceFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleStatus {
    /// Added to the index by this run
    New,
    /// Already indexed under the same address
    Existing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub added: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Outcome of a full harvest-and-ingest run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub harvest_failures: Vec<SourceFailure>,
    pub ingest: IngestReport,
}

/// Publishes harvested articles, adding only addresses the index does not
/// know yet.
#[derive(Clone)]
pub struct IngestionDriver {
    index: Arc<dyn ArticleIndex>,
}

impl IngestionDriver {
    pub fn new(index: Arc<dyn ArticleIndex>) -> Self {
        Self { index }
    }

    pub async fn ingest_article(&self, article: &Article) -> Result<ArticleStatus> {
        let existing = self.index.try_get_article_id(&article.address).await?;
        if existing.exists {
            return Ok(ArticleStatus::Existing);
        }
        self.index.add_article(article).await?;
        Ok(ArticleStatus::New)
    }

    /// Ingests `articles` in order. A failing article is counted and logged,
    /// the remaining ones are still processed.
    pub async fn ingest(&self, articles: &[Article]) -> IngestReport {
        let mut report = IngestReport::default();
        for article in articles {
            match self.ingest_article(article).await {
                Ok(ArticleStatus::New) => {
                    info!(address = %article.address, title = %article.title, "🆕 Article added");
                    report.added += 1;
                }
                Ok(ArticleStatus::Existing) => {
                    debug!(address = %article.address, "⏭️ Article already indexed");
                    report.skipped += 1;
                }
                Err(error) => {
                    warn!(address = %article.address, %error, "Article ingestion failed");
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Harvests every portal of `manager`, then ingests what was collected.
    pub async fn run(&self, manager: &ScraperManager) -> Result<RunReport> {
        let harvest = manager.get_articles_from_news_portals().await?;
        for failure in &harvest.failures {
            warn!(source = failure.source, error = %failure.error, "Portal skipped in this run");
        }

        let ingest = self.ingest(&harvest.articles).await;
        info!(
            backend = self.index.name(),
            added = ingest.added,
            skipped = ingest.skipped,
            failed = ingest.failed,
            "Ingestion finished"
        );

        Ok(RunReport {
            harvest_failures: harvest.failures,
            ingest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;
    use async_trait::async_trait;
    use nc_core::{Error, ExistsResult, RelatedResult};
    use nc_storage::InMemoryIndex;

    fn articles() -> Vec<Article> {
        vec![
            Article::new("https://index.hu/belfold/a/", "A", "a").with_text("első\n"),
            Article::new("https://www.hirado.hu/belfold/b/", "B", "b").with_text("második\n"),
            Article::new("http://www.origo.hu/itthon/c.html", "C", "c").with_text("harmadik\n"),
        ]
    }

    #[tokio::test]
    async fn test_ingest_is_idempotent() {
        let index = Arc::new(InMemoryIndex::new());
        let driver = IngestionDriver::new(index.clone());

        let first = driver.ingest(&articles()).await;
        assert_eq!(first, IngestReport { added: 3, skipped: 0, failed: 0 });

        let second = driver.ingest(&articles()).await;
        assert_eq!(second, IngestReport { added: 0, skipped: 3, failed: 0 });
        assert_eq!(index.len().await, 3);
    }

    #[tokio::test]
    async fn test_ingest_article_status() {
        let driver = IngestionDriver::new(Arc::new(InMemoryIndex::new()));
        let article = Article::new("https://index.hu/belfold/a/", "A", "a");

        assert_eq!(driver.ingest_article(&article).await.unwrap(), ArticleStatus::New);
        assert_eq!(driver.ingest_article(&article).await.unwrap(), ArticleStatus::Existing);
    }

    /// Rejects every article from Hirado.hu, delegates the rest.
    struct FlakyIndex {
        inner: InMemoryIndex,
    }

    #[async_trait]
    impl ArticleIndex for FlakyIndex {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn add_article(&self, article: &Article) -> Result<()> {
            if article.address.contains("hirado.hu") {
                return Err(Error::BackendRejected {
                    status: 400,
                    body: "mapper_parsing_exception".to_string(),
                });
            }
            self.inner.add_article(article).await
        }

        async fn try_get_article_id(&self, address: &str) -> Result<ExistsResult> {
            self.inner.try_get_article_id(address).await
        }

        async fn try_get_related_article_address(&self, id: &str) -> Result<RelatedResult> {
            self.inner.try_get_related_article_address(id).await
        }
    }

    #[tokio::test]
    async fn test_one_bad_article_does_not_stop_the_rest() {
        let index = Arc::new(FlakyIndex {
            inner: InMemoryIndex::new(),
        });
        let driver = IngestionDriver::new(index.clone());

        let report = driver.ingest(&articles()).await;

        assert_eq!(report, IngestReport { added: 2, skipped: 0, failed: 1 });
        assert!(index
            .try_get_article_id("http://www.origo.hu/itthon/c.html")
            .await
            .unwrap()
            .exists);
    }

    #[tokio::test]
    async fn test_run_reports_failed_portals() {
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with_page(
                    "http://www.origo.hu/itthon/index.html",
                    r#"<div class="news-item"><a class="news-title" href="/itthon/x.html">X</a><p class="news-lead">L</p></div>"#,
                )
                .with_page(
                    "http://www.origo.hu/itthon/x.html",
                    r#"<div id="article-text"><p>Szöveg</p></div>"#,
                ),
        );
        let manager = ScraperManager::with_default_scrapers(fetcher);
        let driver = IngestionDriver::new(Arc::new(InMemoryIndex::new()));

        let report = driver.run(&manager).await.unwrap();

        assert_eq!(report.ingest.added, 1);
        let failed: Vec<_> = report.harvest_failures.iter().map(|f| f.source).collect();
        assert_eq!(failed, vec!["Index.hu", "Hirado.hu"]);
    }
}
