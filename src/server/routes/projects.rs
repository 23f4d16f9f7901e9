//! Project endpoints
//!
//! Listing and reading need `view_project`, creating and editing need
//! `add_project`. Batches are created under their project.

use crate::auth::Permission;
use crate::core::models::BatchFilter;
use crate::core::models::project::{ProjectFilter, ProjectInput};
use crate::server::middleware::get_request_context;
use crate::server::routes::ApiResponse;
use crate::server::routes::multipart::parse_batch_form;
use crate::server::state::AppState;
use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use tracing::info;

/// Configure project routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .route("", web::get().to(list_projects))
            .route("", web::post().to(create_project))
            .route("/{id}", web::get().to(get_project))
            .route("/{id}", web::put().to(update_project))
            .route("/{id}", web::delete().to(delete_project))
            .route("/{id}/batches", web::get().to(list_project_batches))
            .route("/{id}/batches", web::post().to(create_batch)),
    );
}

async fn list_projects(
    state: web::Data<AppState>,
    req: HttpRequest,
    filter: web::Query<ProjectFilter>,
) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;
    state.auth.authorize(&context, Permission::ViewProject)?;

    let projects = state.projects.list(&filter).await?;
    let meta = serde_json::json!({ "count": projects.len() });
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_meta(projects, meta)))
}

async fn create_project(
    state: web::Data<AppState>,
    req: HttpRequest,
    input: web::Json<ProjectInput>,
) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;
    let user = state.auth.authorize(&context, Permission::AddProject)?;

    let project = state.projects.create(input.into_inner()).await?;
    info!("{} created project {}", user.username, project.project.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(project)))
}

async fn get_project(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;
    state.auth.authorize(&context, Permission::ViewProject)?;

    let project = state.projects.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(project)))
}

async fn update_project(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
    input: web::Json<ProjectInput>,
) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;
    state.auth.authorize(&context, Permission::AddProject)?;

    let project = state
        .projects
        .update(path.into_inner(), input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(project)))
}

async fn delete_project(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;
    let user = state.auth.authorize(&context, Permission::AddProject)?;

    let project_id = path.into_inner();
    state.projects.delete(project_id).await?;
    info!("{} deleted project {}", user.username, project_id);
    Ok(HttpResponse::NoContent().finish())
}

#[derive(Debug, Deserialize)]
struct BatchSearch {
    #[serde(default)]
    search: Option<String>,
}

async fn list_project_batches(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
    query: web::Query<BatchSearch>,
) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;
    state.auth.authorize(&context, Permission::ViewBatch)?;

    let filter = BatchFilter {
        project_id: Some(path.into_inner()),
        search: query.into_inner().search,
    };
    let batches = state.batches.list(&filter).await?;
    let meta = serde_json::json!({ "count": batches.len() });
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_meta(batches, meta)))
}

/// Create a batch from a multipart form
async fn create_batch(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;
    state.auth.authorize(&context, Permission::AddBatch)?;

    let form = parse_batch_form(payload, state.config.server().max_body_size).await?;
    let batch = state
        .batches
        .create(&context, path.into_inner(), form)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(batch)))
}
