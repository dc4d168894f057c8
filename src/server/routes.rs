//! Request handlers for the `/users` endpoints.
//!
//! Each handler locks the store for the whole operation, snapshot write
//! included, so mutations are applied one at a time.

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};

use super::AppState;
use super::error::ApiError;
use super::extract::JsonBody;
use crate::models::User;
use crate::store::StoreError;

/// `POST /users/create_user/`
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(user): JsonBody<User>,
) -> Result<Json<User>, ApiError> {
    let created = state.store().lock().await.insert(user)?;
    Ok(Json(created))
}

/// `GET /users/`
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.store().lock().await.list().to_vec())
}

/// `GET /users/get/{user_id}`
pub async fn get_user(
    State(state): State<AppState>,
    user_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    let Path(id) = user_id?;
    let store = state.store().lock().await;
    let user = store.find(id).cloned().ok_or(StoreError::NotFound { id })?;
    Ok(Json(user))
}

/// `PUT /users/update_user/{user_id}`
pub async fn update_user(
    State(state): State<AppState>,
    user_id: Result<Path<i64>, PathRejection>,
    JsonBody(user): JsonBody<User>,
) -> Result<Json<User>, ApiError> {
    let Path(id) = user_id?;
    let updated = state.store().lock().await.replace(id, user)?;
    Ok(Json(updated))
}

/// `DELETE /users/delete_user/{user_id}`
pub async fn delete_user(
    State(state): State<AppState>,
    user_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    let Path(id) = user_id?;
    let removed = state.store().lock().await.remove(id)?;
    Ok(Json(removed))
}
