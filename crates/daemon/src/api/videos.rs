use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::pipeline::Pipeline;

#[derive(Deserialize)]
pub struct CreateVideoRequest {
    description: String,
    #[serde(default)]
    local_files: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct CreateVideoResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    video_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/create-video", post(create_video))
        .with_state(pipeline)
}

impl CreateVideoResponse {
    fn failure(error: String) -> Json<Self> {
        Json(CreateVideoResponse {
            success: false,
            video_path: None,
            error: Some(error),
        })
    }
}

async fn create_video(
    State(pipeline): State<Arc<Pipeline>>,
    payload: Result<Json<CreateVideoRequest>, JsonRejection>,
) -> (StatusCode, Json<CreateVideoResponse>) {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!("[Api] create-video rejected: {}", rejection.body_text());
            return (rejection.status(), CreateVideoResponse::failure(rejection.body_text()));
        }
    };

    info!(
        "[Api] create-video: {:?} with {} local files",
        req.description,
        req.local_files.len()
    );

    match pipeline.create_video(&req.description, &req.local_files).await {
        Ok(path) => (
            StatusCode::OK,
            Json(CreateVideoResponse {
                success: true,
                video_path: path.map(|p| p.to_string_lossy().into_owned()),
                error: None,
            }),
        ),
        Err(e) => {
            error!("[Api] create-video failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                CreateVideoResponse::failure(e.to_string()),
            )
        }
    }
}
