use auth_rebac::PermissionMap;
use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::server::RebacServer;

#[derive(Debug, Serialize)]
pub struct DefinitionView {
    pub relations: BTreeMap<String, String>,
    pub permissions: BTreeMap<String, String>,
}

/// Parsed schema plus the derived relation -> permission map
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub schema: BTreeMap<String, DefinitionView>,
    pub permission_map: PermissionMap,
    pub total_definitions: usize,
}

/// `GET /schema`
pub async fn get_schema(State(server): State<RebacServer>) -> Json<SchemaResponse> {
    let schema = server.engine.schema();
    let definitions = schema
        .definitions
        .iter()
        .map(|(name, definition)| {
            (
                name.clone(),
                DefinitionView {
                    relations: definition.relations.clone(),
                    permissions: definition.permissions.clone(),
                },
            )
        })
        .collect();

    Json(SchemaResponse {
        schema: definitions,
        permission_map: server.engine.permission_map().as_ref().clone(),
        total_definitions: schema.definition_count(),
    })
}
