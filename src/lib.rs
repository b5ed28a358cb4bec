pub mod config;
pub mod omdb;
pub mod routes;
pub mod rpc;
pub mod telemetry;

use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::{omdb::OmdbService, rpc::Status};

/// Shared handler state
#[derive(Clone)]
pub struct Ctx {
    pub omdb: OmdbService,
}

impl Ctx {
    #[must_use]
    pub const fn new(omdb: OmdbService) -> Self {
        Self { omdb }
    }
}

/// Envelope for successful API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            code: 200,
            message: message.into(),
            data: Some(data),
        }
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, Status>;

/// Build the full application router
pub fn app(ctx: Ctx) -> Router {
    Router::new()
        .nest("/api", routes::api::mount())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
