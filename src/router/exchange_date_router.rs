use axum::{Router, routing::{get, post}};
use crate::handler::exchange_date_handler::{get_exchange_date_handler, set_exchange_date_handler};
use std::sync::Arc;
use crate::service::exchange_date_service::ExchangeDateServiceImpl;

pub fn exchange_date_router(service: Arc<ExchangeDateServiceImpl>) -> Router {
    Router::new()
        .route("/set-exchange-date", post(set_exchange_date_handler))
        .route("/get-exchange-date", get(get_exchange_date_handler))
        .with_state(service)
}
