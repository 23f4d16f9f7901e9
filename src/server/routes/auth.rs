//! Registration, login and account endpoints

use crate::auth::{LoginRequest, RegisterRequest};
use crate::server::middleware::get_request_context;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::info;

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/me", web::get().to(me)),
    );
}

/// Self-registration; the account stays pending until approved
async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    let user = state.auth.register(request.into_inner()).await?;
    info!("Account {} registered and awaiting approval", user.username);

    Ok(HttpResponse::Created().json(ApiResponse::success_with_meta(
        user,
        serde_json::json!({ "status": "pending" }),
    )))
}

async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    let response = state.auth.login(&request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Current account with its effective permissions
async fn me(state: web::Data<AppState>, req: HttpRequest) -> ActixResult<HttpResponse> {
    let context = get_request_context(&req)?;
    let info = state.auth.account_info(&context).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(info)))
}
