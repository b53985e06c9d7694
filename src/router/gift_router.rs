use axum::{Router, routing::{get, put}};
use crate::handler::gift_handler::{
    list_gifts_handler,
    create_gift_handler,
    update_gift_handler,
    delete_gift_handler,
};
use std::sync::Arc;
use crate::service::gift_service::GiftServiceImpl;

pub fn gift_router(service: Arc<GiftServiceImpl>) -> Router {
    Router::new()
        .route("/gifts", get(list_gifts_handler).post(create_gift_handler))
        .route("/gifts/{id}", put(update_gift_handler).delete(delete_gift_handler))
        .with_state(service)
}
