use axum::{extract::State, http::StatusCode, Json};
use models::product::{Category, ProductId};
use service::product::domain::{ProductInput, ProductResponse, StockUpdate};
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::{ApiPath, ValidatedJson};
use crate::routes::ServerState;

#[utoipa::path(
    get, path = "/products", tag = "productos",
    responses(
        (status = 200, description = "All products", body = [crate::openapi::ProductResponseDoc])
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ProductResponse>>, JsonApiError> {
    let list = state.products.list_all().await?;
    info!(count = list.len(), "list products");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "productos",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductResponseDoc),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Json<ProductResponse>, JsonApiError> {
    Ok(Json(state.products.get_by_id(id).await?))
}

#[utoipa::path(
    get, path = "/products/category/{category}", tag = "productos",
    params(("category" = String, Path, description = "Category literal, e.g. ELECTRONICA")),
    responses(
        (status = 200, description = "Products in the category", body = [crate::openapi::ProductResponseDoc]),
        (status = 400, description = "Unknown category")
    )
)]
pub async fn list_by_category(
    State(state): State<ServerState>,
    ApiPath(category): ApiPath<Category>,
) -> Result<Json<Vec<ProductResponse>>, JsonApiError> {
    let list = state.products.list_by_category(category).await?;
    info!(%category, count = list.len(), "list products by category");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/products", tag = "productos",
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductResponseDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> Result<(StatusCode, Json<ProductResponse>), JsonApiError> {
    let created = state.products.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "productos",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductResponseDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<ProductId>,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> Result<Json<ProductResponse>, JsonApiError> {
    Ok(Json(state.products.update(id, input).await?))
}

#[utoipa::path(
    patch, path = "/products/{id}/stock", tag = "productos",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = crate::openapi::StockUpdateDoc,
    responses(
        (status = 200, description = "Stock updated", body = crate::openapi::ProductResponseDoc),
        (status = 400, description = "Invalid stock"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_stock(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<ProductId>,
    ValidatedJson(body): ValidatedJson<StockUpdate>,
) -> Result<Json<ProductResponse>, JsonApiError> {
    Ok(Json(state.products.update_stock(id, body.stock).await?))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "productos",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<StatusCode, JsonApiError> {
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
