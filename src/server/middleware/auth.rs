//! Authentication middleware

use crate::core::models::RequestContext;
use crate::server::middleware::helpers::{extract_bearer_token, is_public_route};
use crate::server::state::AppState;
use crate::utils::error::QualityError;
use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::Method;
use actix_web::http::header::{HeaderName, HeaderValue, USER_AGENT};
use actix_web::{HttpMessage, HttpRequest, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::debug;

/// Response header echoing the id of the request
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds the `RequestContext` for every request and requires a bearer
/// token outside the public routes
///
/// Every response carries `X-Request-Id`, and error envelopes carry the
/// same id in `error.request_id`.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let context = base_context(&req);
            let request_id = context.request_id.clone();
            let http_req = req.request().clone();

            let res = match authorize(service, req, context).await {
                Ok(res) => tag_error_response(res, &request_id),
                Err(err) => {
                    let response = match err.as_error::<QualityError>() {
                        Some(error) => error.response_for_request(Some(&request_id)),
                        None => err.error_response(),
                    };
                    ServiceResponse::new(http_req, response).map_into_right_body()
                }
            };

            Ok(with_request_id_header(res, &request_id))
        })
    }
}

async fn authorize<S, B>(
    service: Rc<S>,
    req: ServiceRequest,
    context: RequestContext,
) -> Result<ServiceResponse<B>, actix_web::Error>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    if req.method() == Method::OPTIONS || is_public_route(req.path()) {
        req.extensions_mut().insert(context);
        return service.call(req).await;
    }

    let token = extract_bearer_token(req.headers())
        .ok_or_else(|| QualityError::unauthorized("Missing bearer token"))?;

    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| QualityError::internal("Application state is not configured"))?;

    let context = state.auth.authenticate_token(&token, context).await?;
    debug!(
        "Request {} {} authenticated",
        context.request_id,
        req.path()
    );

    req.extensions_mut().insert(context);
    service.call(req).await
}

/// Re-render a handler's `QualityError` with the request id filled in
fn tag_error_response<B>(
    res: ServiceResponse<B>,
    request_id: &str,
) -> ServiceResponse<EitherBody<B>> {
    let replacement = res
        .response()
        .error()
        .and_then(|err| err.as_error::<QualityError>())
        .map(|err| err.response_for_request(Some(request_id)));

    match replacement {
        Some(response) => res.into_response(response).map_into_right_body(),
        None => res.map_into_left_body(),
    }
}

fn with_request_id_header<B>(mut res: ServiceResponse<B>, request_id: &str) -> ServiceResponse<B> {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        res.headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    res
}

/// Extract request context from request
pub fn get_request_context(req: &HttpRequest) -> Result<RequestContext, QualityError> {
    req.extensions()
        .get::<RequestContext>()
        .cloned()
        .ok_or_else(|| QualityError::unauthorized("Authentication required"))
}

fn base_context(req: &ServiceRequest) -> RequestContext {
    let client_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    RequestContext::new().with_client_info(client_ip, user_agent)
}
