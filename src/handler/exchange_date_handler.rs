use axum::{extract::{rejection::JsonRejection, State}, response::IntoResponse, Json};
use crate::dto::exchange_date_dto::{ExchangeDateResponse, SetExchangeDateRequest};
use crate::service::exchange_date_service::{ExchangeDateService, ExchangeDateServiceImpl};
use crate::util::error::HandlerError;
use std::sync::Arc;

pub async fn set_exchange_date_handler(
    State(service): State<Arc<ExchangeDateServiceImpl>>,
    payload: Result<Json<SetExchangeDateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload?;
    let record = service.set_exchange_date(payload.date_time).await?;
    Ok(Json(ExchangeDateResponse::from(record)))
}

/// Answers JSON `null` until a date has been set.
pub async fn get_exchange_date_handler(
    State(service): State<Arc<ExchangeDateServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let record = service.get_exchange_date().await?;
    Ok(Json(record.map(ExchangeDateResponse::from)))
}
