#![allow(dead_code)]

pub mod mongo;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use bson::oid::ObjectId;
use gift_exchange_backend::app::app::AppServices;
use gift_exchange_backend::router::create_router;
use gift_exchange_backend::util::upload::UploadStore;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt; // for .oneshot()

pub const BOUNDARY: &str = "gift-exchange-test-boundary";
const BODY_LIMIT: usize = 10 * 1024 * 1024;

pub struct TestApp {
    pub router: Router,
    pub upload_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

pub async fn setup_app() -> TestApp {
    setup_app_with(false).await
}

pub async fn setup_app_with(keep_image_on_update: bool) -> TestApp {
    let upload_dir = std::env::temp_dir().join(format!("gift-exchange-test-{}", ObjectId::new().to_hex()));
    let uploads = Arc::new(UploadStore::new(&upload_dir).await.expect("upload store"));
    let services = AppServices::in_memory(uploads, keep_image_on_update);
    TestApp {
        router: create_router(&services, BODY_LIMIT),
        upload_dir,
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    (status, body.to_vec())
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(app, req).await
}

pub fn as_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

pub fn as_text(body: &[u8]) -> String {
    String::from_utf8_lossy(body).to_string()
}

/// A file part for [`multipart_body`]: field name, file name, bytes.
pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub data: &'a [u8],
}

pub fn multipart_body(fields: &[(&str, &str)], files: &[FilePart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes());
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    for file in files {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
                file.field, file.file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub async fn send_multipart(
    app: &Router,
    method: &str,
    uri: &str,
    fields: &[(&str, &str)],
    files: &[FilePart<'_>],
) -> (StatusCode, Vec<u8>) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(multipart_body(fields, files)))
        .unwrap();
    send(app, req).await
}
