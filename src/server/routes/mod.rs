//! HTTP routes, one module per resource

pub mod auth;
pub mod batches;
pub mod health;
mod multipart;
pub mod projects;
pub mod users;

use actix_web::web;
use serde::Serialize;

/// Envelope for every successful response
///
/// Failures use `ErrorResponse` instead, so `success` is always true here;
/// it is kept so clients can branch on one field.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    /// Counts and echoed filters for list endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }

    pub fn success_with_meta(data: T, meta: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            meta: Some(meta),
        }
    }
}

/// Register every route of the service
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(projects::configure_routes)
        .configure(batches::configure_routes)
        .configure(users::configure_routes);
}
