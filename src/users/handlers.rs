use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::age::today;
use super::dto::{ListParams, MessageResponse, UserRequest, UserResponse, UsersPage};
use super::services;
use crate::{error::ApiError, state::AppState};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::Validation("invalid id".into()))
}

fn body(payload: Result<Json<UserRequest>, JsonRejection>) -> Result<UserRequest, ApiError> {
    payload
        .map(|Json(req)| req)
        .map_err(|e| ApiError::Validation(e.body_text()))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<UsersPage>, ApiError> {
    let params = ListParams::from_pairs(pairs);
    let page = services::list_users(&state.db, &params, today()).await?;
    Ok(Json(page))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_id(&id)?;
    let user = services::get_user(&state.db, id, today()).await?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let req = body(payload)?;
    let user = services::create_user(&state.db, req, today()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_id(&id)?;
    let req = body(payload)?;
    let user = services::update_user(&state.db, id, req, today()).await?;
    Ok(Json(user))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    services::delete_user(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "user deleted".into(),
    }))
}
