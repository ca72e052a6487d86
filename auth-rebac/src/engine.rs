use crate::{
    check::PermissionChecker,
    error::Result,
    models::*,
    permission_map::PermissionMap,
    repository::{RelationshipRepository, RelationshipStore},
    schema::Schema,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Authorization contract consumed by resource services.
///
/// Absence of a grant is an `Ok` denial, never an error.
pub trait Authorizer: Send + Sync {
    fn check_authorization(
        &self,
        subject: &str,
        resource: &str,
        permission: &str,
    ) -> Result<AuthDecision>;

    /// Same as [`Authorizer::check_authorization`] but global admins always pass.
    fn check_authorization_with_global(
        &self,
        subject: &str,
        resource: &str,
        permission: &str,
    ) -> Result<AuthDecision>;
}

/// Relationship-based authorization engine
pub struct AuthorizationEngine {
    /// Parsed schema, immutable after startup
    schema: Arc<Schema>,

    /// Relation -> permission lookup derived from the schema
    permission_map: Arc<PermissionMap>,

    /// Runtime-mutable relationship tuples
    repository: Arc<dyn RelationshipRepository>,

    checker: PermissionChecker,

    /// Grant checked before every overridable check
    sentinel: GlobalAdminSentinel,
}

impl AuthorizationEngine {
    pub fn new(schema: Schema, repository: Arc<dyn RelationshipRepository>) -> Self {
        let schema = Arc::new(schema);
        let permission_map = Arc::new(PermissionMap::build(&schema));
        let checker = PermissionChecker::new(repository.clone(), permission_map.clone());

        Self {
            schema,
            permission_map,
            repository,
            checker,
            sentinel: GlobalAdminSentinel::default(),
        }
    }

    /// Load the schema and baseline relationships from disk.
    ///
    /// Either failure is fatal for the caller; there is no degraded mode.
    pub fn from_sources(
        schema_path: impl AsRef<Path>,
        relationships_path: impl AsRef<Path>,
        sentinel: GlobalAdminSentinel,
    ) -> Result<Self> {
        let schema = Schema::load(schema_path)?;
        let store = RelationshipStore::load(relationships_path)?;
        let engine = Self::new(schema, Arc::new(store)).with_sentinel(sentinel);

        info!(
            definitions = engine.schema.definition_count(),
            relations = engine.permission_map.len(),
            relationships = engine.repository.len(),
            sentinel_resource = %engine.sentinel.resource,
            sentinel_permission = %engine.sentinel.permission,
            "Authorization engine ready"
        );
        Ok(engine)
    }

    pub fn with_sentinel(mut self, sentinel: GlobalAdminSentinel) -> Self {
        self.sentinel = sentinel;
        self
    }

    // =============================================================================
    // Checks
    // =============================================================================

    pub fn check(&self, subject: &str, resource: &str, permission: &str) -> bool {
        self.checker.check(subject, resource, permission)
    }

    /// Sentinel grant first; if it holds, the requested check is skipped.
    pub fn check_with_global_override(
        &self,
        subject: &str,
        resource: &str,
        permission: &str,
    ) -> bool {
        if self.is_global_admin(subject) {
            debug!(subject, resource, permission, "Global admin override");
            return true;
        }
        self.check(subject, resource, permission)
    }

    pub fn is_global_admin(&self, subject: &str) -> bool {
        self.check(subject, &self.sentinel.resource, &self.sentinel.permission)
    }

    /// Check and attach a denial reason naming the inputs.
    pub fn decide(
        &self,
        subject: &str,
        resource: &str,
        permission: &str,
        global_override: bool,
    ) -> AuthDecision {
        let allowed = if global_override {
            self.check_with_global_override(subject, resource, permission)
        } else {
            self.check(subject, resource, permission)
        };

        if allowed {
            AuthDecision::allow()
        } else {
            AuthDecision::deny(subject, resource, permission)
        }
    }

    /// Keep the resources `subject` may access with `permission`.
    ///
    /// Global admins get the full list back.
    pub fn filter_accessible<I, S>(&self, subject: &str, resources: I, permission: &str) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let resources = resources.into_iter().map(Into::into);
        if self.is_global_admin(subject) {
            return resources.collect();
        }
        resources
            .filter(|resource| self.check(subject, resource, permission))
            .collect()
    }

    // =============================================================================
    // Relationship management
    // =============================================================================

    pub fn add_relationship(&self, relationship: Relationship) -> bool {
        self.repository.add(relationship)
    }

    pub fn remove_relationship(&self, relationship: &Relationship) -> bool {
        self.repository.remove(relationship)
    }

    pub fn relationships(&self) -> Vec<Relationship> {
        self.repository.list()
    }

    pub fn relationships_for_user(&self, user: &str, resource: Option<&str>) -> Vec<UserRelationship> {
        self.repository.relationships_for_user(user, resource)
    }

    // =============================================================================
    // Introspection
    // =============================================================================

    pub fn schema(&self) -> Arc<Schema> {
        self.schema.clone()
    }

    pub fn permission_map(&self) -> Arc<PermissionMap> {
        self.permission_map.clone()
    }

    pub fn store(&self) -> Arc<dyn RelationshipRepository> {
        self.repository.clone()
    }

    pub fn sentinel(&self) -> &GlobalAdminSentinel {
        &self.sentinel
    }
}

impl Authorizer for AuthorizationEngine {
    fn check_authorization(
        &self,
        subject: &str,
        resource: &str,
        permission: &str,
    ) -> Result<AuthDecision> {
        Ok(self.decide(subject, resource, permission, false))
    }

    fn check_authorization_with_global(
        &self,
        subject: &str,
        resource: &str,
        permission: &str,
    ) -> Result<AuthDecision> {
        Ok(self.decide(subject, resource, permission, true))
    }
}
