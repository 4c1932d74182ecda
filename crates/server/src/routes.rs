use std::sync::Arc;

use axum::{routing::get, Json, Router};
use configs::PaginationConfig;
use serde::Serialize;
use service::{LinkBuilder, QueryLinks};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

pub mod items;
pub mod redirects;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: u32,
    pub name: String,
}

/// Shared handler state: pagination defaults, the in-memory catalog and the
/// link builder used for pager links and redirects.
#[derive(Clone)]
pub struct AppState {
    pub pagination: PaginationConfig,
    pub catalog: Arc<Vec<CatalogItem>>,
    pub links: Arc<dyn LinkBuilder>,
}

impl AppState {
    pub fn new(pagination: PaginationConfig, catalog: Vec<CatalogItem>) -> Self {
        Self { pagination, catalog: Arc::new(catalog), links: Arc::new(QueryLinks) }
    }

    pub fn with_links(mut self, links: Arc<dyn LinkBuilder>) -> Self {
        self.links = links;
        self
    }
}

/// `Item 1` .. `Item n`.
pub fn demo_catalog(n: u32) -> Vec<CatalogItem> {
    (1..=n).map(|id| CatalogItem { id, name: format!("Item {id}") }).collect()
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/items", get(items::list_items))
        .route("/items/latest", get(items::latest_items))
        .route("/api/items", get(items::api_items))
        .route("/catalog", get(redirects::legacy_catalog))
        .route("/back", get(redirects::back))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
