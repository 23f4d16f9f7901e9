//! Account approval endpoints
//!
//! Administrators list pending and active accounts, approve pending ones
//! into a group and delete accounts.

use crate::core::approval::ApprovalAction;
use crate::server::middleware::get_request_context;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use uuid::Uuid;

/// Configure user administration routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("/pending", web::get().to(list_pending))
            .route("/pending/{id}/approve/reader", web::post().to(approve_reader))
            .route("/pending/{id}/approve/editor", web::post().to(approve_editor))
            .route("/pending/{id}", web::delete().to(delete_pending))
            .route("/active", web::get().to(list_active))
            .route("/active/{id}", web::delete().to(delete_active)),
    );
}

async fn list_pending(state: web::Data<AppState>, req: HttpRequest) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;
    let users = state.auth.list_pending_users(&context).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(users)))
}

async fn list_active(state: web::Data<AppState>, req: HttpRequest) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;
    let users = state.auth.list_active_users(&context).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(users)))
}

async fn approve_reader(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    apply(state, req, path.into_inner(), ApprovalAction::ApproveReader).await
}

async fn approve_editor(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    apply(state, req, path.into_inner(), ApprovalAction::ApproveEditor).await
}

async fn delete_pending(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    apply(state, req, path.into_inner(), ApprovalAction::DeletePending).await
}

async fn delete_active(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    apply(state, req, path.into_inner(), ApprovalAction::DeleteActive).await
}

async fn apply(
    state: web::Data<AppState>,
    req: HttpRequest,
    target_id: Uuid,
    action: ApprovalAction,
) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;

    match state.auth.apply_approval(&context, target_id, action).await? {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user))),
        None => Ok(HttpResponse::NoContent().finish()),
    }
}
