use async_trait::async_trait;
use nc_core::{Article, ArticleIndex, Error, ExistsResult, RelatedResult, Result};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::query::{ExistsQuery, MoreLikeThisQuery};
use crate::response::{parse_search_result, SearchResult};
use crate::BackendConfig;

/// Article index backed by an Elasticsearch `news` index.
pub struct ElasticsearchIndex {
    client: reqwest::Client,
    base_url: Url,
    index: String,
}

impl ElasticsearchIndex {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        // Url::join drops the last path segment unless the base ends with '/'
        let mut raw = config.url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.url, e)))?;

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url,
            index: config.index.clone(),
        })
    }

    fn endpoint(&self, action: &str) -> Result<Url> {
        self.base_url
            .join(&format!("{}/{}?pretty", self.index, action))
            .map_err(|e| Error::InvalidUrl(e.to_string()))
    }

    async fn search<Q: Serialize + Sync>(&self, query: &Q) -> Result<SearchResult> {
        let response = self
            .client
            .post(self.endpoint("_search")?)
            .header(ACCEPT, "application/json")
            .json(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(Error::BackendUnreachable {
                status: status.as_u16(),
                body,
            });
        }

        parse_search_result(&body)
    }
}

#[async_trait]
impl ArticleIndex for ElasticsearchIndex {
    fn name(&self) -> &str {
        "elasticsearch"
    }

    async fn add_article(&self, article: &Article) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("_doc")?)
            .header(ACCEPT, "application/json")
            .json(article)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            warn!(address = %article.address, status = status.as_u16(), "Backend did not create document");
            return Err(Error::BackendRejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(address = %article.address, "Document created");
        Ok(())
    }

    async fn try_get_article_id(&self, address: &str) -> Result<ExistsResult> {
        let result = self.search(&ExistsQuery::for_address(address)).await?;
        result.to_exists_result()
    }

    async fn try_get_related_article_address(&self, id: &str) -> Result<RelatedResult> {
        let result = self
            .search(&MoreLikeThisQuery::for_document(&self.index, id))
            .await?;
        debug!(id, total = result.total, top_score = ?result.hits.first().map(|h| h.score), "More-like-this result");
        Ok(result.to_related_result())
    }
}
