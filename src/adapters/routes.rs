use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    adapters::{
        controllers::{file_controller::FileController, health_controller::HealthController},
        state::AppState,
    },
    application::validation::MAX_FILE_SIZE,
};

/// Headroom for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn create_router(app_state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/health", get(HealthController::health_check))
        .route("/api/files", get(FileController::list_files))
        .route("/api/files/upload", post(FileController::upload_file))
        .route(
            "/api/files/download/{file_name}",
            get(FileController::download_file),
        )
        .route("/api/files/{file_name}", delete(FileController::delete_file))
        .layer(DefaultBodyLimit::max(
            MAX_FILE_SIZE as usize + MULTIPART_OVERHEAD,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::{
        adapters::repositories::InMemoryFileRepository,
        application::services::{BlobStore, FileService},
        services::LocalBlobStore,
    };

    const BOUNDARY: &str = "----filebox-test-boundary";

    async fn test_app() -> (TempDir, Router) {
        let dir = TempDir::new().unwrap();
        let upload_dir = dir.path().join("uploads");
        let blobs = Arc::new(LocalBlobStore::new(&upload_dir));
        blobs.init().await.unwrap();
        let file_service = FileService::new(Arc::new(InMemoryFileRepository::new()), blobs);

        let state = AppState {
            file_service: Arc::new(file_service),
            upload_dir,
        };
        (dir, create_router(state, CorsLayer::permissive()))
    }

    fn multipart_body(field: &str, filename: &str, content_type: &str, content: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/files/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn upload(app: &Router, filename: &str, content: &[u8]) -> (StatusCode, Value) {
        let body = multipart_body("file", filename, "text/plain", content);
        let response = app.clone().oneshot(upload_request(body)).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn delete_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_returns_created_record() {
        let (_dir, app) = test_app().await;

        let (status, json) = upload(&app, "notes.txt", b"hello").await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["originalFileName"], "notes.txt");
        assert_eq!(json["fileSize"], 5);
        assert_eq!(json["contentType"], "text/plain");
        assert!(json["fileName"].as_str().unwrap().ends_with(".txt"));
        assert!(json["id"].is_i64());
        assert_eq!(json["uploadedAt"], json["lastModified"]);
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_type() {
        let (_dir, app) = test_app().await;

        let (status, json) = upload(&app, "payload.exe", b"MZ").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("exe"));
    }

    #[tokio::test]
    async fn test_upload_without_file_field() {
        let (_dir, app) = test_app().await;
        let body = multipart_body("attachment", "notes.txt", "text/plain", b"hello");

        let response = app.oneshot(upload_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_download_round_trip() {
        let (_dir, app) = test_app().await;
        let (_, json) = upload(&app, "my report.pdf", b"%PDF-1.7").await;
        let name = json["fileName"].as_str().unwrap().to_string();

        let response = app
            .oneshot(get_request(&format!("/api/files/download/{name}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename*=UTF-8''my%20report.pdf"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_download_unknown_file() {
        let (_dir, app) = test_app().await;

        let response = app
            .oneshot(get_request("/api/files/download/nope.txt"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (_dir, app) = test_app().await;
        for name in ["a.txt", "b.txt", "c.txt"] {
            upload(&app, name, b"x").await;
        }

        let response = app.oneshot(get_request("/api/files")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["originalFileName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["c.txt", "b.txt", "a.txt"]);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (_dir, app) = test_app().await;
        let (_, json) = upload(&app, "a.json", b"{}").await;
        let name = json["fileName"].as_str().unwrap().to_string();
        let uri = format!("/api/files/{name}");

        let response = app.clone().oneshot(delete_request(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(delete_request(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let (_dir, app) = test_app().await;

        let response = app.oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["config"]["maxSize"], 104_857_600u64);
        assert_eq!(json["config"]["allowedExtensions"].as_array().unwrap().len(), 17);
    }
}
