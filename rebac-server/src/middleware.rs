use auth_rebac::Principal;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderName, Method},
};
use std::convert::Infallible;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// CORS policy for browser clients: any origin, the verbs the API uses.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static(USER_ID_HEADER),
        ])
        .max_age(Duration::from_secs(3600))
}

/// Caller identity taken from `X-User-ID`, anonymous when absent.
#[derive(Debug, Clone)]
pub struct RequestSubject(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for RequestSubject
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok());

        Ok(RequestSubject(Principal::from_header(value)))
    }
}

impl std::ops::Deref for RequestSubject {
    type Target = Principal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
