use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::Uri,
};

use super::params::{decode_json, parse_product_id};
use crate::{
    AppState,
    error::{AppError, Result},
    middleware::RequestId,
    models::{NewProduct, Product, ProductUpdate, StatusResponse},
};

#[tracing::instrument(
    name = "handlers.products.get_all_products",
    skip_all,
    fields(request_id = %request_id)
)]
pub async fn get_all_products(
    State(state): State<AppState>,
    request_id: RequestId,
    uri: Uri,
) -> Result<Json<Vec<Product>>> {
    tracing::info!(url = %uri, "Listing products");

    let products = state
        .storage
        .get_all_products()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to get products"))?;

    tracing::info!(url = %uri, count = products.len(), "Retrieved products successfully");

    Ok(Json(products))
}

#[tracing::instrument(
    name = "handlers.products.create_product",
    skip_all,
    fields(request_id = %request_id)
)]
pub async fn create_product(
    State(state): State<AppState>,
    request_id: RequestId,
    uri: Uri,
    body: Bytes,
) -> Result<Json<StatusResponse>> {
    tracing::info!(url = %uri, "Creating new product");

    let payload: NewProduct = decode_json(&body)
        .inspect_err(|e| tracing::error!(error = %e, "failed to decode request body"))?;

    let product = state
        .storage
        .create_product(payload)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to create product"))?;

    tracing::info!(id = product.id, url = %uri, "Product created successfully");

    Ok(Json(
        StatusResponse::new("Product created successfully").with_id(product.id),
    ))
}

#[tracing::instrument(
    name = "handlers.products.get_product_by_id",
    skip_all,
    fields(request_id = %request_id)
)]
pub async fn get_product_by_id(
    State(state): State<AppState>,
    request_id: RequestId,
    uri: Uri,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>> {
    tracing::info!(url = %uri, "Fetching product");

    let id = parse_product_id(&raw_id)
        .inspect_err(|e| tracing::error!(id = %raw_id, error = %e, "invalid id"))?;

    let product = state
        .storage
        .get_product_by_id(id)
        .await
        .inspect_err(|e| tracing::error!(id, error = %e, "failed to get a product"))?;

    tracing::info!(id, url = %uri, "A product is retrieved successfully");

    Ok(Json(product))
}

#[tracing::instrument(
    name = "handlers.products.update_product",
    skip_all,
    fields(request_id = %request_id)
)]
pub async fn update_product(
    State(state): State<AppState>,
    request_id: RequestId,
    uri: Uri,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<StatusResponse>> {
    tracing::info!(url = %uri, "Updating product");

    let id = parse_product_id(&raw_id)
        .inspect_err(|e| tracing::error!(id = %raw_id, error = %e, "invalid id"))?;

    let payload: ProductUpdate = decode_json(&body)
        .inspect_err(|e| tracing::error!(error = %e, "failed to decode request body"))?;

    if payload.id.is_some_and(|body_id| body_id != id) {
        tracing::error!(id, body_id = ?payload.id, "id in body does not match path");
        return Err(AppError::BadRequest(
            "id in body does not match path".to_string(),
        ));
    }

    state
        .storage
        .update_product(id, payload)
        .await
        .inspect_err(|e| tracing::error!(id, error = %e, "failed to update product"))?;

    tracing::info!(id, url = %uri, "Product updated successfully");

    Ok(Json(StatusResponse::new("Product updated successfully")))
}

#[tracing::instrument(
    name = "handlers.products.delete_product",
    skip_all,
    fields(request_id = %request_id)
)]
pub async fn delete_product(
    State(state): State<AppState>,
    request_id: RequestId,
    uri: Uri,
    Path(raw_id): Path<String>,
) -> Result<Json<StatusResponse>> {
    tracing::info!(url = %uri, "Deleting product");

    let id = parse_product_id(&raw_id)
        .inspect_err(|e| tracing::error!(id = %raw_id, error = %e, "invalid id"))?;

    state
        .storage
        .delete_product(id)
        .await
        .inspect_err(|e| tracing::error!(id, error = %e, "failed to delete product"))?;

    tracing::info!(id, url = %uri, "Deleted product successfully");

    Ok(Json(StatusResponse::new("Product deleted successfully")))
}
