use axum::{
    extract::{FromRequest, Multipart, Path, Request, State},
    http::header::CONTENT_TYPE,
    response::IntoResponse,
    Json,
};
use crate::dto::gift_dto::{GiftForm, GiftResponse, UploadedFile};
use crate::handler::parse_object_id;
use crate::service::gift_service::{GiftService, GiftServiceImpl, GIFT_NOT_FOUND};
use crate::util::error::HandlerError;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, error};

/// The only form field accepted as a file.
pub const IMAGE_FIELD: &str = "image";

/// Gift bodies arrive as `multipart/form-data` (with an optional `image`
/// file) or as plain JSON; anything else is treated as an empty form.
impl<S> FromRequest<S> for GiftForm
where
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| HandlerError::bad_request(e.body_text()))?;
            read_multipart(multipart).await
        } else if content_type.starts_with("application/json") {
            let Json(body) = Json::<Map<String, Value>>::from_request(req, state).await?;
            read_json(body)
        } else {
            Ok(GiftForm::default())
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<GiftForm, HandlerError> {
    let mut form = GiftForm::default();
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Error getting next field: {}", e);
        HandlerError::bad_request(format!("Failed to read form: {}", e))
    })? {
        let name = field.name().map(str::to_string).unwrap_or_default();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                if name != IMAGE_FIELD || form.image.is_some() {
                    return Err(HandlerError::bad_request("Unexpected field"));
                }
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(|e| {
                    error!("Failed to read file field: {}", e);
                    HandlerError::bad_request(format!("Failed to read file: {}", e))
                })?;
                // Browsers send an empty part when no file was picked.
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }
                debug!("Received file {} ({} bytes)", file_name, data.len());
                form.image = Some(UploadedFile { file_name, content_type, data });
            }
            None => {
                let value = field.text().await.map_err(|e| {
                    HandlerError::bad_request(format!("Failed to read field {}: {}", name, e))
                })?;
                form.fields.set(&name, value).map_err(HandlerError::bad_request)?;
            }
        }
    }
    Ok(form)
}

fn read_json(body: Map<String, Value>) -> Result<GiftForm, HandlerError> {
    let mut form = GiftForm::default();
    for (name, value) in body {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(HandlerError::bad_request(format!("Invalid value for {}", name)));
            }
        };
        form.fields.set(&name, text).map_err(HandlerError::bad_request)?;
    }
    Ok(form)
}

pub async fn list_gifts_handler(
    State(service): State<Arc<GiftServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let gifts = service.list_gifts().await?;
    Ok(Json(gifts.into_iter().map(GiftResponse::from).collect::<Vec<_>>()))
}

pub async fn create_gift_handler(
    State(service): State<Arc<GiftServiceImpl>>,
    form: GiftForm,
) -> Result<impl IntoResponse, HandlerError> {
    let gift = service.create_gift(form).await?;
    Ok(Json(GiftResponse::from(gift)))
}

pub async fn update_gift_handler(
    State(service): State<Arc<GiftServiceImpl>>,
    Path(id): Path<String>,
    form: GiftForm,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, GIFT_NOT_FOUND)?;
    let gift = service.update_gift(id, form).await?;
    Ok(Json(GiftResponse::from(gift)))
}

pub async fn delete_gift_handler(
    State(service): State<Arc<GiftServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, GIFT_NOT_FOUND)?;
    let gift = service.delete_gift(id).await?;
    Ok(Json(GiftResponse::from(gift)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_json_accepts_numeric_amount() {
        let body = json!({ "name": "Scarf", "amount": 350, "userId": null });
        let form = read_json(body.as_object().unwrap().clone()).unwrap();
        assert_eq!(form.fields.name.as_deref(), Some("Scarf"));
        assert_eq!(form.fields.amount, Some(350.0));
        assert!(form.fields.user_id.is_none());
        assert!(form.image.is_none());
    }

    #[test]
    fn test_read_json_rejects_nested_values() {
        let body = json!({ "name": ["Scarf"] });
        assert!(read_json(body.as_object().unwrap().clone()).is_err());
    }
}
