use axum::{
    routing::{get, post},
    Router,
};
use crate::{
    handlers::{authorize, health, relationships, schema, user_roles},
    server::RebacServer,
};

/// Create health check routes
pub fn health_routes() -> Router<RebacServer> {
    Router::new().route("/health", get(health::health_check))
}

/// Authorization check and schema introspection
pub fn authorization_routes() -> Router<RebacServer> {
    Router::new()
        .route("/authorize", post(authorize::authorize))
        .route("/schema", get(schema::get_schema))
}

/// Relationship administration; every change is in-memory only
pub fn relationship_routes() -> Router<RebacServer> {
    Router::new()
        .route(
            "/relationships",
            get(relationships::list_relationships)
                .post(relationships::add_relationship)
                .delete(relationships::remove_relationship),
        )
        .route(
            "/user-roles",
            get(user_roles::get_user_roles).post(user_roles::post_user_roles),
        )
        .route("/add-user-role", post(relationships::add_user_role))
        .route("/remove-user-role", post(relationships::remove_user_role))
}

/// Create all application routes
pub fn create_routes() -> Router<RebacServer> {
    Router::new()
        .merge(health_routes())
        .merge(authorization_routes())
        .merge(relationship_routes())
}
