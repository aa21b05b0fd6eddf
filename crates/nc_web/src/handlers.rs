use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use nc_storage::Resolution;
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use crate::AppState;

pub const EMPTY_ADDRESS: &str = "Article address must not be empty.";
pub const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Deserialize)]
pub struct ArticleQuery {
    pub address: Option<String>,
}

/// `GET /api/article?address=<url>`: the related article's address as plain text.
pub async fn get_related_article(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArticleQuery>,
) -> impl IntoResponse {
    let address = query.address.unwrap_or_default();
    let address = address.trim();
    if address.is_empty() {
        return (StatusCode::BAD_REQUEST, EMPTY_ADDRESS.to_string());
    }

    match state.resolver.resolve(address).await {
        Ok(Resolution::Related(related)) => (StatusCode::OK, related),
        Ok(Resolution::UnknownArticle) | Ok(Resolution::NoRelatedArticle) => {
            (StatusCode::NOT_FOUND, String::new())
        }
        Err(e) => {
            error!(address, error = %e, "Related article lookup failed");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
        }
    }
}
