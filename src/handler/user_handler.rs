use axum::{extract::{rejection::JsonRejection, Path, State}, response::IntoResponse, Json};
use crate::dto::user_dto::{LoginRequest, RegisterRequest, UserResponse};
use crate::handler::parse_object_id;
use crate::model::user::UserChanges;
use crate::service::user_service::{UserService, UserServiceImpl, USER_NOT_FOUND};
use crate::util::error::HandlerError;
use std::sync::Arc;

pub async fn list_users_handler(
    State(service): State<Arc<UserServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let users = service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect::<Vec<_>>()))
}

// Register
pub async fn register_handler(
    State(service): State<Arc<UserServiceImpl>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload?;
    let user = service.register(payload).await?;
    Ok(Json(UserResponse::from(user)))
}

// Login
pub async fn login_handler(
    State(service): State<Arc<UserServiceImpl>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload?;
    let user = service.login(payload.email, payload.password).await?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn update_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
    payload: Result<Json<UserChanges>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload?;
    let id = parse_object_id(&id, USER_NOT_FOUND)?;
    let user = service.update_user(id, payload).await?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_user_handler(
    State(service): State<Arc<UserServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, USER_NOT_FOUND)?;
    let user = service.delete_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}
