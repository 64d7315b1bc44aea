use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde_json::{json, Value};

use catalog_core::catalog::{SearchParams, SearchQuery, ValidationError};

use crate::{handlers::AppError, state::AppState};

const SEARCH_PATH: &str = "/v1/products/search";

/// Filtered, sorted and paginated product search (GET /v1/products/search).
pub async fn search_products(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(params) = params.map_err(|e| ValidationError::Malformed(e.body_text()))?;
    let query = SearchQuery::try_from(params)?;

    let result = state.usecase.search_products(&query).await?;
    let next_page_url = result
        .next_page
        .map(|page| query.page_url(SEARCH_PATH, page));

    tracing::debug!(
        total = result.total_count,
        page = result.page,
        returned = result.items.len(),
        "Searched products"
    );

    Ok(Json(json!({
        "products": result.items,
        "total_count": result.total_count,
        "page": result.page,
        "page_size": result.page_size,
        "total_pages": result.total_pages,
        "next_page_url": next_page_url,
    })))
}
