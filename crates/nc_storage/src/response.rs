//! Typed search responses and the decisions taken on them.

use nc_core::{Article, Error, ExistsResult, RelatedResult, Result};
use serde::Deserialize;

/// Top hits scoring below this are not reported as related.
pub const RELATED_SCORE_THRESHOLD: f64 = 10.0;

/// Body of a successful `_search` call.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub took: Option<u64>,
    #[serde(default)]
    pub timed_out: Option<bool>,
    pub hits: Hits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hits {
    pub total: Total,
    #[serde(default)]
    pub max_score: Option<f64>,
    pub hits: Vec<Hit>,
}

/// Hit count, either a bare integer or the `{ "value": n }` object newer
/// backends send.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum Total {
    Count(u64),
    Object { value: u64 },
}

impl Total {
    pub fn value(self) -> u64 {
        match self {
            Total::Count(n) | Total::Object { value: n } => n,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub article: Article,
}

/// Hits in backend relevance order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub total: u64,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub score: f64,
    pub article: Article,
}

impl From<QueryResult> for SearchResult {
    fn from(result: QueryResult) -> Self {
        Self {
            total: result.hits.total.value(),
            hits: result
                .hits
                .hits
                .into_iter()
                .map(|hit| SearchHit {
                    id: hit.id,
                    score: hit.score.unwrap_or(0.0),
                    article: hit.article,
                })
                .collect(),
        }
    }
}

/// Deserializes a success body, rejecting anything without `hits.total` and
/// `hits.hits`.
pub fn parse_search_result(body: &str) -> Result<SearchResult> {
    serde_json::from_str::<QueryResult>(body)
        .map(SearchResult::from)
        .map_err(|e| Error::UnexpectedResponseShape(e.to_string()))
}

impl SearchResult {
    /// Existence is `total > 0`; the id comes from the first hit.
    pub fn to_exists_result(&self) -> Result<ExistsResult> {
        if self.total == 0 {
            return Ok(ExistsResult::not_found());
        }
        self.hits
            .first()
            .map(|hit| ExistsResult::found(hit.id.clone()))
            .ok_or_else(|| {
                Error::UnexpectedResponseShape(format!(
                    "total is {} but the hit list is empty",
                    self.total
                ))
            })
    }

    /// Top hit's address, unless there is no hit or it scores under
    /// [`RELATED_SCORE_THRESHOLD`].
    pub fn to_related_result(&self) -> RelatedResult {
        if self.total == 0 {
            return RelatedResult::not_found();
        }
        match self.hits.first() {
            Some(top) if top.score >= RELATED_SCORE_THRESHOLD => {
                RelatedResult::found(top.article.address.clone())
            }
            _ => RelatedResult::not_found(),
        }
    }
}
