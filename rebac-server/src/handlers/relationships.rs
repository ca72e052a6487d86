use auth_rebac::Relationship;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{ApiError, ApiJson, ApiResult},
    server::RebacServer,
};

const ADDED_NOTE: &str = "Added in memory only; it will be lost on restart";
const REMOVED_NOTE: &str =
    "Removed from memory only; the relationships file is reloaded on restart";

#[derive(Debug, Serialize, Deserialize)]
pub struct RelationshipsResponse {
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddedResponse {
    pub added: bool,
    pub relationship: Relationship,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemovedResponse {
    pub removed: bool,
    pub relationship: Relationship,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// `GET /relationships`
pub async fn list_relationships(State(server): State<RebacServer>) -> Json<RelationshipsResponse> {
    Json(RelationshipsResponse {
        relationships: server.engine.relationships(),
    })
}

/// `POST /relationships`
pub async fn add_relationship(
    State(server): State<RebacServer>,
    ApiJson(relationship): ApiJson<Relationship>,
) -> Json<AddedResponse> {
    let added = server.engine.add_relationship(relationship.clone());
    Json(AddedResponse {
        added,
        relationship,
        note: Some(ADDED_NOTE.to_string()),
    })
}

/// `DELETE /relationships`
pub async fn remove_relationship(
    State(server): State<RebacServer>,
    ApiJson(relationship): ApiJson<Relationship>,
) -> Json<RemovedResponse> {
    let removed = server.engine.remove_relationship(&relationship);
    Json(RemovedResponse {
        removed,
        relationship,
        note: Some(REMOVED_NOTE.to_string()),
    })
}

/// `POST /add-user-role`
pub async fn add_user_role(
    State(server): State<RebacServer>,
    ApiJson(relationship): ApiJson<Relationship>,
) -> ApiResult<Json<AddedResponse>> {
    require_complete(&relationship)?;
    info!(
        user = %relationship.subject,
        resource = %relationship.resource,
        relation = %relationship.relation,
        "Adding user role"
    );

    let added = server.engine.add_relationship(relationship.clone());
    Ok(Json(AddedResponse {
        added,
        relationship,
        note: None,
    }))
}

/// `POST /remove-user-role`
pub async fn remove_user_role(
    State(server): State<RebacServer>,
    ApiJson(relationship): ApiJson<Relationship>,
) -> ApiResult<Json<RemovedResponse>> {
    require_complete(&relationship)?;
    info!(
        user = %relationship.subject,
        resource = %relationship.resource,
        relation = %relationship.relation,
        "Removing user role"
    );

    let removed = server.engine.remove_relationship(&relationship);
    Ok(Json(RemovedResponse {
        removed,
        relationship,
        note: None,
    }))
}

fn require_complete(relationship: &Relationship) -> ApiResult<()> {
    if relationship.resource.is_empty()
        || relationship.relation.is_empty()
        || relationship.subject.is_empty()
    {
        return Err(ApiError::validation(
            "Resource, relation, and subject are required",
        ));
    }
    Ok(())
}
