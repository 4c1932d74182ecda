use axum::{extract::State, response::Html, Json};
use common::utils::html::escape;
use serde::Serialize;
use service::{paginate_slice, LimitOffset, PageMeta, PaginateOptions, Pager, RequestContext};

use crate::errors::ApiError;
use crate::redirect::{redirect_to, SeeOther};
use crate::routes::{AppState, CatalogItem};

#[derive(Serialize)]
pub struct ItemsPage {
    pub items: Vec<CatalogItem>,
    pub pager: PageMeta,
    pub limit: LimitOffset,
}

/// HTML listing of the catalog, one page at a time.
pub async fn list_items(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Html<String>, ApiError> {
    let page = paginate_slice(state.catalog.as_slice(), &ctx, &PaginateOptions::default(), &state.pagination)?;
    let pager = page.pager.clone().with_links(state.links.clone());

    let mut html = String::from("<h1>Items</h1>");
    if page.is_empty() {
        html.push_str("<p>No items.</p>");
    } else {
        html.push_str("<ol>");
        for (n, item) in page.iter_numbered() {
            html.push_str(&format!(r#"<li value="{n}">{}</li>"#, escape(&item.name)));
        }
        html.push_str("</ol>");
    }
    if pager.has_navigation() {
        html.push_str(&format!(r#"<nav class="pager">{}</nav>"#, pager.navigation()));
    }
    Ok(Html(html))
}

/// JSON listing with pager metadata.
pub async fn api_items(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<ItemsPage>, ApiError> {
    let page = paginate_slice(state.catalog.as_slice(), &ctx, &PaginateOptions::default(), &state.pagination)?;
    let (items, pager) = page.into_parts();
    Ok(Json(ItemsPage { items, pager: pager.meta(), limit: pager.limit_clause() }))
}

/// Jump to the last page of the listing.
pub async fn latest_items(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<SeeOther, ApiError> {
    let pager = Pager::from_config(&ctx, &state.pagination, state.catalog.len() as u64)?;
    // 空列表没有最后一页，落到第 1 页
    let last = pager.last_page().max(pager.first_page());
    let see = redirect_to(&*state.links, "/items", &[(pager.key().to_string(), last.to_string())])?;
    Ok(see)
}
