use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    // the browser extension calls in from arbitrary page origins
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/article", get(handlers::get_related_article))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Serving related-article API");
    axum::serve(listener, create_app(state)).await
}

pub mod prelude {
    pub use crate::AppState;
    pub use nc_core::{Article, Error, Result};
}
