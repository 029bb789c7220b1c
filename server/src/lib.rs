use anyhow::Result;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use docsearch_core::{Searcher, SearcherConfig, WordSegmenter};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Clone)]
pub struct AppState {
    pub searcher: Arc<Searcher<WordSegmenter>>,
}

/// Build the index described by `config`, then the router serving it. Fails
/// if the corpus can't be read, in which case nothing should be served.
pub fn build_app(config: &SearcherConfig) -> Result<Router> {
    let (searcher, stats) = Searcher::open(config)?;
    tracing::info!(documents = stats.documents, skipped = stats.skipped, terms = stats.terms, "searcher ready");
    Ok(router(Arc::new(searcher)))
}

pub fn router(searcher: Arc<Searcher<WordSegmenter>>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .with_state(AppState { searcher })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    // An unparseable query string searches for nothing instead of failing.
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!(%rejection, "malformed search parameters");
            SearchParams { query: String::new() }
        }
    };
    match state.searcher.search_json(&params.query) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(err) => {
            tracing::error!(%err, query = %params.query, "failed to serialize results");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
