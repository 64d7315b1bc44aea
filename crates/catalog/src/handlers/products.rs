//! Product handlers.
//!
//! Writes go through a single management endpoint whose `action` field picks
//! add, edit or delete.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use catalog_core::catalog::{ProductCommand, ProductManagementRequest, ValidationError};

use crate::{
    context::RequestContext,
    handlers::{error::message_response, parse_id, AppError},
    state::AppState,
};

/// Add, edit or delete a product (POST /v1/product).
pub async fn manage_product(
    State(state): State<AppState>,
    body: Result<Json<ProductManagementRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = body.map_err(|e| ValidationError::Malformed(e.body_text()))?;
    tracing::debug!(action = %request.action, product_id = request.product.id, "Received product request");

    match request.into_command()? {
        ProductCommand::Add(product) => {
            let id = state.usecase.create_product(&product).await?;
            tracing::info!(product_id = id, name = %product.name, "Created new product");

            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "message": format!("Successfully create new product {id}"),
                    "id": id,
                })),
            )
                .into_response())
        }
        ProductCommand::Edit(product) => {
            let product = state.usecase.update_product(product).await?;
            tracing::info!(product_id = product.id, "Updated product");

            Ok(Json(json!({
                "message": "Successfully update product",
                "product": product,
            }))
            .into_response())
        }
        ProductCommand::Delete(id) => {
            state.usecase.delete_product(id).await?;
            tracing::info!(product_id = id, "Deleted product");

            Ok(message_response(StatusCode::OK, "Successfully delete product"))
        }
    }
}

/// Get a product by ID (GET /v1/product/{id}).
pub async fn get_product(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id("product", &raw_id)?;
    let product = state.usecase.get_product(id, ctx.request_id).await?;

    if !product.exists() {
        tracing::info!(product_id = id, request_id = %ctx.request_id, "Product not found");
        return Ok(message_response(
            StatusCode::NOT_FOUND,
            format!("product {id} not found"),
        ));
    }

    Ok(Json(json!({ "product": product })).into_response())
}
