use axum::{Router, routing::{get, post, put}};
use crate::handler::user_handler::{
    list_users_handler,
    register_handler,
    login_handler,
    update_user_handler,
    delete_user_handler,
};
use std::sync::Arc;
use crate::service::user_service::UserServiceImpl;

pub fn user_router(service: Arc<UserServiceImpl>) -> Router {
    Router::new()
        .route("/users", get(list_users_handler).post(register_handler))
        .route("/users/{id}", put(update_user_handler).delete(delete_user_handler))
        .route("/login", post(login_handler))
        .with_state(service)
}
