use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use tracing::{info, warn};

use crate::{
    adapters::dto::file_dto::FileResponse,
    application::{error::ApplicationError, services::FileService},
    domain::models::file::FileData,
};

pub struct FileController;

impl FileController {
    /// POST /api/files/upload
    /// Multipart body with a single `file` part.
    pub async fn upload_file(
        State(file_service): State<Arc<FileService>>,
        mut multipart: Multipart,
    ) -> Result<(StatusCode, Json<FileResponse>), ApplicationError> {
        let mut file_data: Option<FileData> = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            warn!("Invalid multipart data: {}", e);
            ApplicationError::BadRequest("Invalid request format".to_string())
        })? {
            if field.name() != Some("file") {
                continue;
            }

            let filename = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let content = field.bytes().await.map_err(|e| {
                warn!("Cannot read file bytes: {}", e);
                ApplicationError::BadRequest("Invalid file data".to_string())
            })?;

            file_data = Some(FileData::new(content.to_vec(), filename, content_type));
        }

        let file_data = file_data.ok_or_else(|| {
            warn!("Missing required 'file' field in upload");
            ApplicationError::BadRequest("Missing required field".to_string())
        })?;

        let record = file_service.upload(file_data).await?;

        Ok((StatusCode::CREATED, Json(FileResponse::from(record))))
    }

    /// GET /api/files
    pub async fn list_files(
        State(file_service): State<Arc<FileService>>,
    ) -> Result<Json<Vec<FileResponse>>, ApplicationError> {
        let files = file_service.list_files().await?;
        Ok(Json(files.into_iter().map(FileResponse::from).collect()))
    }

    /// GET /api/files/download/{file_name}
    pub async fn download_file(
        State(file_service): State<Arc<FileService>>,
        Path(file_name): Path<String>,
    ) -> Result<Response, ApplicationError> {
        let download = file_service.download(&file_name).await?;

        info!("Serving {} ({} bytes)", file_name, download.content.len());

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .header(header::CONTENT_LENGTH, download.content.len())
            .header(
                header::CONTENT_DISPOSITION,
                content_disposition(&download.original_name),
            )
            .body(Body::from(download.content))
            .map_err(|e| ApplicationError::Io(format!("Cannot build download response: {}", e)))
    }

    /// DELETE /api/files/{file_name}
    pub async fn delete_file(
        State(file_service): State<Arc<FileService>>,
        Path(file_name): Path<String>,
    ) -> Result<StatusCode, ApplicationError> {
        file_service.delete(&file_name).await?;
        Ok(StatusCode::NO_CONTENT)
    }
}

/// RFC 5987 `filename*` so non-ASCII names survive the header.
fn content_disposition(original_name: &str) -> String {
    format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(original_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_encoding() {
        assert_eq!(
            content_disposition("report.pdf"),
            "attachment; filename*=UTF-8''report.pdf"
        );
        assert_eq!(
            content_disposition("my notes.txt"),
            "attachment; filename*=UTF-8''my%20notes.txt"
        );
        assert_eq!(
            content_disposition("日本.txt"),
            "attachment; filename*=UTF-8''%E6%97%A5%E6%9C%AC.txt"
        );
        assert_eq!(
            content_disposition("a\"b\r\n.txt"),
            "attachment; filename*=UTF-8''a%22b%0D%0A.txt"
        );
    }
}
