use axum::{extract::{rejection::JsonRejection, Path, State}, response::IntoResponse, Json};
use crate::dto::announcement_dto::AnnouncementResponse;
use crate::handler::parse_object_id;
use crate::model::announcement::AnnouncementFields;
use crate::service::announcement_service::{AnnouncementService, AnnouncementServiceImpl, ANNOUNCEMENT_NOT_FOUND};
use crate::util::error::HandlerError;
use std::sync::Arc;

pub async fn list_announcements_handler(
    State(service): State<Arc<AnnouncementServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let announcements = service.list_announcements().await?;
    Ok(Json(announcements.into_iter().map(AnnouncementResponse::from).collect::<Vec<_>>()))
}

pub async fn create_announcement_handler(
    State(service): State<Arc<AnnouncementServiceImpl>>,
    payload: Result<Json<AnnouncementFields>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload?;
    let announcement = service.create_announcement(payload).await?;
    Ok(Json(AnnouncementResponse::from(announcement)))
}

pub async fn update_announcement_handler(
    State(service): State<Arc<AnnouncementServiceImpl>>,
    Path(id): Path<String>,
    payload: Result<Json<AnnouncementFields>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload?;
    let id = parse_object_id(&id, ANNOUNCEMENT_NOT_FOUND)?;
    let announcement = service.update_announcement(id, payload).await?;
    Ok(Json(AnnouncementResponse::from(announcement)))
}

pub async fn delete_announcement_handler(
    State(service): State<Arc<AnnouncementServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, ANNOUNCEMENT_NOT_FOUND)?;
    let announcement = service.delete_announcement(id).await?;
    Ok(Json(AnnouncementResponse::from(announcement)))
}
