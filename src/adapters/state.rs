use axum::extract::FromRef;
use std::{path::PathBuf, sync::Arc};

use crate::application::services::FileService;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub file_service: Arc<FileService>,
    pub upload_dir: PathBuf,
}
