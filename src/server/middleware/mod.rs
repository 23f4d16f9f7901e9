//! HTTP middleware implementations
//!
//! Bearer token authentication that places a `RequestContext` in the
//! request extensions for every handler.

mod auth;
mod helpers;


pub use auth::{AuthMiddleware, AuthMiddlewareService, REQUEST_ID_HEADER, get_request_context};
pub use helpers::{extract_bearer_token, is_public_route};
