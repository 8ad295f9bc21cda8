use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::Uri,
};

use super::params::{decode_json, require_param};
use crate::{
    AppState,
    error::Result,
    middleware::RequestId,
    models::{NewUser, StatusResponse, User},
};

#[tracing::instrument(
    name = "handlers.users.get_all_users",
    skip_all,
    fields(request_id = %request_id)
)]
pub async fn get_all_users(
    State(state): State<AppState>,
    request_id: RequestId,
    uri: Uri,
) -> Result<Json<Vec<User>>> {
    tracing::info!(url = %uri, "Listing users");

    let users = state
        .storage
        .get_all_users()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to get users"))?;

    tracing::info!(url = %uri, count = users.len(), "Retrieved users successfully");

    Ok(Json(users))
}

#[tracing::instrument(
    name = "handlers.users.create_user",
    skip_all,
    fields(request_id = %request_id)
)]
pub async fn create_user(
    State(state): State<AppState>,
    request_id: RequestId,
    uri: Uri,
    body: Bytes,
) -> Result<Json<StatusResponse>> {
    tracing::info!(url = %uri, "Creating new user");

    let payload: NewUser = decode_json(&body)
        .inspect_err(|e| tracing::error!(error = %e, "failed to decode request body"))?;

    let user = state
        .storage
        .create_user(payload)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to create user"))?;

    tracing::info!(id = user.id, url = %uri, "User created successfully");

    Ok(Json(
        StatusResponse::new("User created successfully").with_id(user.id),
    ))
}

/// Users are addressed by email; the segment is used verbatim, so padded
/// addresses do not match.
#[tracing::instrument(
    name = "handlers.users.get_user_by_email",
    skip_all,
    fields(request_id = %request_id)
)]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    request_id: RequestId,
    uri: Uri,
    Path(raw_email): Path<String>,
) -> Result<Json<User>> {
    tracing::info!(url = %uri, "Fetching user");

    let email = require_param(&raw_email).inspect_err(|_| tracing::error!("empty id"))?;

    let user = state
        .storage
        .get_user_by_email(email)
        .await
        .inspect_err(|e| tracing::error!(email, error = %e, "failed to get user"))?;

    tracing::info!(id = user.id, url = %uri, "User is retrieved successfully");

    Ok(Json(user))
}
