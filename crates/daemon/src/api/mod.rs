use axum::Router;
use std::sync::Arc;

use crate::pipeline::Pipeline;

pub mod videos;

pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new().merge(videos::router(pipeline))
}
