//! Request payloads for the search backend.
//!
//! Both queries are plain data built fresh per call; nothing here touches the
//! network.

use serde::Serialize;

/// Field list returned by existence queries.
const EXISTS_SOURCE_FIELDS: [&str; 2] = ["Title", "Address"];

/// Document type used in more-like-this references.
pub const DOCUMENT_TYPE: &str = "_doc";

/// `min_doc_freq` of the more-like-this query.
pub const MIN_DOC_FREQ: u32 = 1;

/// Constant-score exact match on `Address.keyword`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExistsQuery {
    query: ExistsClause,
    #[serde(rename = "_source")]
    source: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct ExistsClause {
    constant_score: ConstantScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct ConstantScore {
    filter: Filter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Filter {
    term: Term,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Term {
    #[serde(rename = "Address.keyword")]
    address_keyword: String,
}

impl ExistsQuery {
    pub fn for_address(address: &str) -> Self {
        Self {
            query: ExistsClause {
                constant_score: ConstantScore {
                    filter: Filter {
                        term: Term {
                            address_keyword: address.to_string(),
                        },
                    },
                },
            },
            source: EXISTS_SOURCE_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn address(&self) -> &str {
        &self.query.constant_score.filter.term.address_keyword
    }
}

/// "Similar documents" query seeded by one stored document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoreLikeThisQuery {
    query: MoreLikeThisClause,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct MoreLikeThisClause {
    more_like_this: MoreLikeThis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct MoreLikeThis {
    like: Vec<DocumentRef>,
    min_doc_freq: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct DocumentRef {
    #[serde(rename = "_index")]
    index: String,
    #[serde(rename = "_type")]
    doc_type: String,
    #[serde(rename = "_id")]
    id: String,
}

impl MoreLikeThisQuery {
    pub fn for_document(index: &str, id: &str) -> Self {
        Self {
            query: MoreLikeThisClause {
                more_like_this: MoreLikeThis {
                    like: vec![DocumentRef {
                        index: index.to_string(),
                        doc_type: DOCUMENT_TYPE.to_string(),
                        id: id.to_string(),
                    }],
                    min_doc_freq: MIN_DOC_FREQ,
                },
            },
        }
    }

    /// Id of the seed document.
    pub fn seed_id(&self) -> &str {
        self.query
            .more_like_this
            .like
            .first()
            .map(|doc| doc.id.as_str())
            .unwrap_or_default()
    }
}
