//! API key gate for admin routes.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    Error, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use subtle::ConstantTimeEq;

use blog_core::error::AuthError;
use blog_core::ports::RateLimiter;

use super::error::AppError;

/// Header carrying the admin secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Decides whether a presented key may reach an admin handler.
///
/// Order matters: presence, then the per-key rate limit, then equality. Wrong
/// keys are counted against their own bucket, so guessing is throttled too.
#[derive(Clone)]
pub struct ApiKeyGate {
    secret: Arc<str>,
    limiter: Arc<dyn RateLimiter>,
}

impl ApiKeyGate {
    /// An empty `secret` rejects every key.
    pub fn new(secret: &str, limiter: Arc<dyn RateLimiter>) -> Self {
        Self {
            secret: Arc::from(secret),
            limiter,
        }
    }

    pub async fn authorize(&self, presented: Option<&str>) -> Result<(), AuthError> {
        let key = match presented {
            Some(key) if !key.is_empty() => key,
            _ => return Err(AuthError::MissingKey),
        };

        match self.limiter.check(key).await {
            Ok(result) if !result.allowed => {
                tracing::warn!(
                    retry_after_secs = result.reset_after.as_secs(),
                    "Rate limit exceeded for API key"
                );
                return Err(AuthError::RateLimited {
                    retry_after: result.reset_after,
                });
            }
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "Rate limiter error, failing open"),
        }

        let matches: bool = key.as_bytes().ct_eq(self.secret.as_bytes()).into();
        if self.secret.is_empty() || !matches {
            tracing::warn!("Rejected admin request with invalid API key");
            return Err(AuthError::InvalidKey);
        }

        Ok(())
    }
}

/// Middleware factory wrapping a scope with [`ApiKeyGate`].
pub struct ApiKeyMiddleware {
    gate: ApiKeyGate,
}

impl ApiKeyMiddleware {
    pub fn new(gate: ApiKeyGate) -> Self {
        Self { gate }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ApiKeyMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyMiddlewareService {
            service: Rc::new(service),
            gate: self.gate.clone(),
        }))
    }
}

pub struct ApiKeyMiddlewareService<S> {
    service: Rc<S>,
    gate: ApiKeyGate,
}

impl<S, B> Service<ServiceRequest> for ApiKeyMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gate = self.gate.clone();

        Box::pin(async move {
            let presented = req
                .headers()
                .get(API_KEY_HEADER)
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

            match gate.authorize(presented.as_deref()).await {
                Ok(()) => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    let response = AppError::from(err).error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}
