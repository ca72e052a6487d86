use crate::{
    models::normalize_subject,
    permission_map::PermissionResolver,
    repository::RelationshipRepository,
};
use std::sync::Arc;
use tracing::debug;

/// Decides whether a subject holds a permission on a resource.
///
/// A tuple matches when its normalized subject equals the normalized
/// input subject and its resource equals the input resource exactly; the
/// check succeeds if the resolver says any matching tuple's relation
/// grants the permission. Missing data is a plain `false`.
pub struct PermissionChecker {
    repository: Arc<dyn RelationshipRepository>,
    resolver: Arc<dyn PermissionResolver>,
}

impl PermissionChecker {
    pub fn new(
        repository: Arc<dyn RelationshipRepository>,
        resolver: Arc<dyn PermissionResolver>,
    ) -> Self {
        Self {
            repository,
            resolver,
        }
    }

    pub fn check(&self, subject: &str, resource: &str, permission: &str) -> bool {
        let subject = normalize_subject(subject);
        let allowed = self.repository.any_grant(subject, resource, &|relation| {
            self.resolver.permits(relation, permission)
        });

        debug!(subject, resource, permission, allowed, "Permission check");
        allowed
    }
}
