//! Batch endpoints
//!
//! Detail, editing, the upload audit trail and the ZIP export.

use crate::auth::Permission;
use crate::core::archive::ArchiveReport;
use crate::core::models::BatchFilter;
use crate::server::middleware::get_request_context;
use crate::server::routes::ApiResponse;
use crate::server::routes::multipart::parse_batch_form;
use crate::server::state::AppState;
use actix_multipart::Multipart;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::{info, warn};

/// Number of documents written to the archive
pub const ARCHIVE_INCLUDED_HEADER: &str = "x-archive-included";
/// Comma separated fields with no attachment
pub const ARCHIVE_SKIPPED_HEADER: &str = "x-archive-skipped";
/// Comma separated fields whose file could not be read
pub const ARCHIVE_FAILED_HEADER: &str = "x-archive-failed";

/// Headers browsers must be allowed to read on the archive download
pub const ARCHIVE_HEADERS: [&str; 3] = [
    ARCHIVE_INCLUDED_HEADER,
    ARCHIVE_SKIPPED_HEADER,
    ARCHIVE_FAILED_HEADER,
];

/// Configure batch routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/batches")
            .route("", web::get().to(list_batches))
            .route("/{id}", web::get().to(get_batch))
            .route("/{id}", web::put().to(update_batch))
            .route("/{id}/audit", web::get().to(batch_audit))
            .route("/{id}/archive", web::get().to(download_archive)),
    );
}

async fn list_batches(
    state: web::Data<AppState>,
    req: HttpRequest,
    filter: web::Query<BatchFilter>,
) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;
    state.auth.authorize(&context, Permission::ViewBatch)?;

    let batches = state.batches.list(&filter).await?;
    let meta = serde_json::json!({ "count": batches.len() });
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_meta(batches, meta)))
}

async fn get_batch(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;
    state.auth.authorize(&context, Permission::ViewBatch)?;

    let detail = state.batches.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(detail)))
}

/// Partial update from a multipart form
async fn update_batch(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;
    state.auth.authorize(&context, Permission::ChangeBatch)?;

    let form = parse_batch_form(payload, state.config.server().max_body_size).await?;
    let batch = state
        .batches
        .update(&context, path.into_inner(), form)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(batch)))
}

async fn batch_audit(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;
    state.auth.authorize(&context, Permission::ViewAudit)?;

    let entries = state.batches.audit(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(entries)))
}

/// Download every present document of a batch as `<lot>.zip`
///
/// Files that could not be read are left out and named in
/// `X-Archive-Failed` rather than failing the download.
async fn download_archive(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;
    let user = state.auth.authorize(&context, Permission::DownloadArchive)?;

    let bundle = state.batches.archive(path.into_inner()).await?;
    if !bundle.report.is_complete() {
        warn!(
            "Archive {} for {} is missing {} file(s)",
            bundle.file_name,
            user.username,
            bundle.report.failed.len()
        );
    } else {
        info!("{} downloaded {}", user.username, bundle.file_name);
    }

    let (included, skipped, failed) = report_headers(&bundle.report);
    Ok(HttpResponse::Ok()
        .content_type("application/zip")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(bundle.file_name)],
        })
        .insert_header((ARCHIVE_INCLUDED_HEADER, included))
        .insert_header((ARCHIVE_SKIPPED_HEADER, skipped))
        .insert_header((ARCHIVE_FAILED_HEADER, failed))
        .body(bundle.bytes))
}

fn report_headers(report: &ArchiveReport) -> (String, String, String) {
    let skipped: Vec<&str> = report.skipped.iter().map(|k| k.as_str()).collect();
    let failed: Vec<&str> = report.failed.iter().map(|f| f.field.as_str()).collect();
    (
        report.included.len().to_string(),
        skipped.join(","),
        failed.join(","),
    )
}
