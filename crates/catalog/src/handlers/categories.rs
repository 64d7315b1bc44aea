//! Product category handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use catalog_core::catalog::{CategoryCommand, CategoryManagementRequest, ValidationError};

use crate::{
    context::RequestContext,
    handlers::{error::message_response, parse_id, AppError},
    state::AppState,
};

/// Add, edit or delete a category (POST /v1/product_category).
pub async fn manage_category(
    State(state): State<AppState>,
    body: Result<Json<CategoryManagementRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = body.map_err(|e| ValidationError::Malformed(e.body_text()))?;
    tracing::debug!(action = %request.action, category_id = request.category.id, "Received category request");

    match request.into_command()? {
        CategoryCommand::Add(category) => {
            let id = state.usecase.create_category(&category).await?;
            tracing::info!(category_id = id, name = %category.name, "Created new category");

            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "message": format!("Successfully create new product category {id}"),
                    "id": id,
                })),
            )
                .into_response())
        }
        CategoryCommand::Edit(category) => {
            let category = state.usecase.update_category(category).await?;
            tracing::info!(category_id = category.id, "Updated category");

            Ok(Json(json!({
                "message": "Successfully update product category",
                "product_category": category,
            }))
            .into_response())
        }
        CategoryCommand::Delete(id) => {
            state.usecase.delete_category(id).await?;
            tracing::info!(category_id = id, "Deleted category");

            Ok(message_response(
                StatusCode::OK,
                "Successfully delete product category",
            ))
        }
    }
}

/// Get a category by ID (GET /v1/product_category/{id}).
pub async fn get_category(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id("product category", &raw_id)?;
    let category = state.usecase.get_category(id, ctx.request_id).await?;

    if !category.exists() {
        tracing::info!(category_id = id, request_id = %ctx.request_id, "Category not found");
        return Ok(message_response(
            StatusCode::NOT_FOUND,
            format!("product category {id} not found"),
        ));
    }

    Ok(Json(json!({ "product_category": category })).into_response())
}
