use serde::{Deserialize, Serialize};

/// A news article as harvested from a portal and stored in the index.
///
/// Field names are capitalized on the wire (`Address`, `Title`, `Lead`,
/// `Text`) because the index mapping and the `Address.keyword` existence
/// filter are keyed on them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Article {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub lead: String,
    #[serde(default)]
    pub text: String,
}

impl Article {
    /// Creates a listing-phase article; `text` is filled by the detail phase.
    pub fn new(address: impl Into<String>, title: impl Into<String>, lead: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            title: title.into(),
            lead: lead.into(),
            text: String::new(),
        }
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self
        }
    }
}

/// Outcome of an existence-by-address lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistsResult {
    pub exists: bool,
    /// Backend-assigned document id, empty when `exists` is false.
    pub id: String,
}

impl ExistsResult {
    pub fn found(id: impl Into<String>) -> Self {
        Self {
            exists: true,
            id: id.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            exists: false,
            id: String::new(),
        }
    }
}

/// Outcome of a related-article lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedResult {
    pub exists: bool,
    /// Address of the most related article, empty when `exists` is false.
    pub address: String,
}

impl RelatedResult {
    pub fn found(address: impl Into<String>) -> Self {
        Self {
            exists: true,
            address: address.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            exists: false,
            address: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_wire_names() {
        let article = Article::new("https://index.hu/x", "Title", "Lead").with_text("Body\n");
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Address": "https://index.hu/x",
                "Title": "Title",
                "Lead": "Lead",
                "Text": "Body\n"
            })
        );
    }

    #[test]
    fn test_partial_source_defaults() {
        let article: Article =
            serde_json::from_str(r#"{"Title":"T","Address":"https://origo.hu/a"}"#).unwrap();
        assert_eq!(article.address, "https://origo.hu/a");
        assert!(article.lead.is_empty());
        assert!(article.text.is_empty());
    }

    #[test]
    fn test_not_found_results_are_empty() {
        assert_eq!(ExistsResult::not_found().id, "");
        assert!(!RelatedResult::not_found().exists);
        assert_eq!(RelatedResult::found("a").address, "a");
    }
}
