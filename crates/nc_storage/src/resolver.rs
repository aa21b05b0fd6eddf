use nc_core::{ArticleIndex, Result};
use std::sync::Arc;
use tracing::debug;

/// Answer to "which stored article is related to this address".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Related(String),
    /// The address itself was never indexed.
    UnknownArticle,
    NoRelatedArticle,
}

/// Resolves an address to its id, then to the most related article.
#[derive(Clone)]
pub struct RelatedArticleResolver {
    index: Arc<dyn ArticleIndex>,
}

impl RelatedArticleResolver {
    pub fn new(index: Arc<dyn ArticleIndex>) -> Self {
        Self { index }
    }

    pub async fn resolve(&self, address: &str) -> Result<Resolution> {
        let existing = self.index.try_get_article_id(address).await?;
        if !existing.exists {
            debug!(address, "Article unknown to backend");
            return Ok(Resolution::UnknownArticle);
        }

        let related = self
            .index
            .try_get_related_article_address(&existing.id)
            .await?;
        if !related.exists {
            debug!(address, id = %existing.id, "No related article");
            return Ok(Resolution::NoRelatedArticle);
        }

        Ok(Resolution::Related(related.address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryIndex;
    use async_trait::async_trait;
    use nc_core::{Article, Error, ExistsResult, RelatedResult};

    const SHARED: &str = "vasút menetrend mozdony állomás utazás kalauz \
        jegyár peron szerelvény késés";

    #[tokio::test]
    async fn test_unknown_address() {
        let resolver = RelatedArticleResolver::new(Arc::new(InMemoryIndex::new()));
        let resolution = resolver.resolve("https://index.hu/never-seen").await.unwrap();
        assert_eq!(resolution, Resolution::UnknownArticle);
    }

    #[tokio::test]
    async fn test_no_related_article() {
        let index = InMemoryIndex::with_articles([Article::new("https://index.hu/a", "A", "")]);
        let resolver = RelatedArticleResolver::new(Arc::new(index));
        let resolution = resolver.resolve("https://index.hu/a").await.unwrap();
        assert_eq!(resolution, Resolution::NoRelatedArticle);
    }

    #[tokio::test]
    async fn test_related_article() {
        let index = InMemoryIndex::with_articles([
            Article::new("https://index.hu/a", "A", "").with_text(SHARED),
            Article::new("http://www.origo.hu/b", "B", "").with_text(SHARED),
        ]);
        let resolver = RelatedArticleResolver::new(Arc::new(index));
        let resolution = resolver.resolve("https://index.hu/a").await.unwrap();
        assert_eq!(resolution, Resolution::Related("http://www.origo.hu/b".to_string()));
    }

    struct BrokenIndex;

    #[async_trait]
    impl ArticleIndex for BrokenIndex {
        fn name(&self) -> &str {
            "broken"
        }

        async fn add_article(&self, _article: &Article) -> nc_core::Result<()> {
            Ok(())
        }

        async fn try_get_article_id(&self, _address: &str) -> nc_core::Result<ExistsResult> {
            Ok(ExistsResult::found("id-1"))
        }

        async fn try_get_related_article_address(&self, _id: &str) -> nc_core::Result<RelatedResult> {
            Err(Error::BackendUnreachable {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let resolver = RelatedArticleResolver::new(Arc::new(BrokenIndex));
        assert!(matches!(
            resolver.resolve("https://index.hu/a").await,
            Err(Error::BackendUnreachable { status: 503, .. })
        ));
    }
}
