use auth_rebac::{AuthDecision, Authorizer};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiJson, ApiResult},
    middleware::RequestSubject,
    server::RebacServer,
};

/// Authorization check request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizeRequest {
    /// Falls back to the `X-User-ID` caller when empty or missing
    #[serde(default)]
    pub subject: String,
    pub resource: String,
    pub permission: String,
    /// Let a global admin grant short-circuit the check
    #[serde(default)]
    pub global_override: bool,
}

/// `POST /authorize`
pub async fn authorize(
    State(server): State<RebacServer>,
    caller: RequestSubject,
    ApiJson(request): ApiJson<AuthorizeRequest>,
) -> ApiResult<Json<AuthDecision>> {
    let subject = if request.subject.is_empty() {
        caller.as_subject().to_string()
    } else {
        request.subject
    };

    let authorizer: &dyn Authorizer = server.engine.as_ref();
    let decision = if request.global_override {
        authorizer.check_authorization_with_global(&subject, &request.resource, &request.permission)?
    } else {
        authorizer.check_authorization(&subject, &request.resource, &request.permission)?
    };

    Ok(Json(decision))
}
