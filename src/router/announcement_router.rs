use axum::{Router, routing::{get, put}};
use crate::handler::announcement_handler::{
    list_announcements_handler,
    create_announcement_handler,
    update_announcement_handler,
    delete_announcement_handler,
};
use std::sync::Arc;
use crate::service::announcement_service::AnnouncementServiceImpl;

pub fn announcement_router(service: Arc<AnnouncementServiceImpl>) -> Router {
    Router::new()
        .route("/announcements", get(list_announcements_handler).post(create_announcement_handler))
        .route("/announcements/{id}", put(update_announcement_handler).delete(delete_announcement_handler))
        .with_state(service)
}
