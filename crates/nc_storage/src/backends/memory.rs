use async_trait::async_trait;
use nc_core::{Article, ArticleIndex, ExistsResult, RelatedResult, Result};
use std::collections::HashSet;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::response::{SearchHit, SearchResult};

/// Words shorter than this are ignored when comparing articles.
const MIN_TERM_LEN: usize = 4;

struct StoredArticle {
    id: String,
    article: Article,
}

/// Backend-free article index.
///
/// Similarity is the number of distinct terms two articles share, so a
/// related article needs at least ten common words to pass the threshold.
#[derive(Default)]
pub struct InMemoryIndex {
    documents: RwLock<Vec<StoredArticle>>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(articles: impl IntoIterator<Item = Article>) -> Self {
        let documents = articles
            .into_iter()
            .map(|article| StoredArticle {
                id: Uuid::new_v4().to_string(),
                article,
            })
            .collect();
        Self {
            documents: RwLock::new(documents),
        }
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn terms(article: &Article) -> HashSet<String> {
        [&article.title, &article.lead, &article.text]
            .into_iter()
            .flat_map(|field| field.split(|c: char| !c.is_alphanumeric()))
            .filter(|word| word.chars().count() >= MIN_TERM_LEN)
            .map(|word| word.to_lowercase())
            .collect()
    }

    async fn more_like_this(&self, id: &str) -> SearchResult {
        let documents = self.documents.read().await;
        let Some(seed) = documents.iter().find(|doc| doc.id == id) else {
            return SearchResult { total: 0, hits: vec![] };
        };
        let seed_terms = Self::terms(&seed.article);

        let mut hits: Vec<SearchHit> = documents
            .iter()
            .filter(|doc| doc.id != id)
            .filter_map(|doc| {
                let shared = Self::terms(&doc.article).intersection(&seed_terms).count();
                (shared > 0).then(|| SearchHit {
                    id: doc.id.clone(),
                    score: shared as f64,
                    article: doc.article.clone(),
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));

        SearchResult {
            total: hits.len() as u64,
            hits,
        }
    }
}

#[async_trait]
impl ArticleIndex for InMemoryIndex {
    fn name(&self) -> &str {
        "memory"
    }

    async fn add_article(&self, article: &Article) -> Result<()> {
        self.documents.write().await.push(StoredArticle {
            id: Uuid::new_v4().to_string(),
            article: article.clone(),
        });
        Ok(())
    }

    async fn try_get_article_id(&self, address: &str) -> Result<ExistsResult> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .find(|doc| doc.article.address == address)
            .map(|doc| ExistsResult::found(doc.id.clone()))
            .unwrap_or_else(ExistsResult::not_found))
    }

    async fn try_get_related_article_address(&self, id: &str) -> Result<RelatedResult> {
        Ok(self.more_like_this(id).await.to_related_result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHARED: &str = "kormány parlament választás költségvetés miniszter \
        törvényjavaslat ellenzék frakció szavazás módosítás";

    #[tokio::test]
    async fn test_add_then_exists() {
        let index = InMemoryIndex::new();
        let address = "https://index.hu/x";

        let before = index.try_get_article_id(address).await.unwrap();
        assert_eq!(before, ExistsResult::not_found());

        index.add_article(&Article::new(address, "T", "L")).await.unwrap();
        let after = index.try_get_article_id(address).await.unwrap();
        assert!(after.exists);
        assert!(!after.id.is_empty());
    }

    #[tokio::test]
    async fn test_related_needs_ten_shared_terms() {
        let index = InMemoryIndex::with_articles([
            Article::new("https://index.hu/a", "A", "").with_text(SHARED),
            Article::new("https://origo.hu/b", "B", "").with_text(format!("{} extra", SHARED)),
            Article::new("https://hirado.hu/c/", "C", "").with_text("kormány parlament"),
        ]);
        let id = index.try_get_article_id("https://index.hu/a").await.unwrap().id;

        let related = index.try_get_related_article_address(&id).await.unwrap();
        assert_eq!(related, RelatedResult::found("https://origo.hu/b"));
    }

    #[tokio::test]
    async fn test_weak_overlap_is_not_related() {
        let index = InMemoryIndex::with_articles([
            Article::new("https://index.hu/a", "A", "").with_text(SHARED),
            Article::new("https://hirado.hu/c/", "C", "").with_text("kormány parlament választás"),
        ]);
        let id = index.try_get_article_id("https://index.hu/a").await.unwrap().id;

        let related = index.try_get_related_article_address(&id).await.unwrap();
        assert_eq!(related, RelatedResult::not_found());
    }

    #[tokio::test]
    async fn test_unknown_seed() {
        let index = InMemoryIndex::new();
        let related = index.try_get_related_article_address("missing").await.unwrap();
        assert!(!related.exists);
    }
}
