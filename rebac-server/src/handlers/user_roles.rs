use auth_rebac::UserRelationship;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{ApiError, ApiJson, ApiResult},
    server::RebacServer,
};

/// Lookup parameters shared by the query string and JSON forms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRolesRequest {
    #[serde(default)]
    pub user: String,
    /// Restrict the result to one resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRolesResponse {
    pub user: String,
    pub relationships: Vec<UserRelationship>,
}

/// `GET /user-roles?user=...&resource=...`
pub async fn get_user_roles(
    State(server): State<RebacServer>,
    Query(request): Query<UserRolesRequest>,
) -> ApiResult<Json<UserRolesResponse>> {
    lookup(&server, request)
}

/// `POST /user-roles`
pub async fn post_user_roles(
    State(server): State<RebacServer>,
    ApiJson(request): ApiJson<UserRolesRequest>,
) -> ApiResult<Json<UserRolesResponse>> {
    lookup(&server, request)
}

fn lookup(server: &RebacServer, request: UserRolesRequest) -> ApiResult<Json<UserRolesResponse>> {
    if request.user.is_empty() {
        return Err(ApiError::validation("User parameter is required"));
    }

    debug!(user = %request.user, resource = ?request.resource, "Looking up user roles");
    let relationships = server
        .engine
        .relationships_for_user(&request.user, request.resource.as_deref());

    Ok(Json(UserRolesResponse {
        user: request.user,
        relationships,
    }))
}
