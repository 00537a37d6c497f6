//! Bearer-token authentication for the `/api` scope.
//!
//! Verified claims are stored in request extensions for `CurrentUser`.
//! Rejections are answered here as Problem Details responses, rendered when
//! the returned future is polled so they carry the request's trace id.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::jwt::{verify_access_token, Claims};
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
            }
            Err(err) => Box::pin(async move {
                let res = err.error_response();
                Ok(req.into_response(res).map_into_right_body())
            }),
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<Claims, AppError> {
    let token = extract_bearer(req.headers().get(header::AUTHORIZATION))?;
    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;
    verify_access_token(&token, &app_state.security)
}

fn extract_bearer(value: Option<&header::HeaderValue>) -> Result<String, AppError> {
    let raw = value
        .ok_or_else(AppError::unauthorized_missing_bearer)?
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    match raw.split_once(' ') {
        Some(("Bearer", token)) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}
