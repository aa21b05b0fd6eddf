use async_trait::async_trait;
use crate::types::{Article, ExistsResult, RelatedResult};
use crate::Result;

/// Document index holding harvested articles.
///
/// Every call is a single round trip without retries; callers own the retry
/// policy.
#[async_trait]
pub trait ArticleIndex: Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &str;

    /// Submit an article as a new document
    async fn add_article(&self, article: &Article) -> Result<()>;

    /// Look up the document id of the article stored under `address`
    async fn try_get_article_id(&self, address: &str) -> Result<ExistsResult>;

    /// Find the address of the article most similar to document `id`
    async fn try_get_related_article_address(&self, id: &str) -> Result<RelatedResult>;
}
