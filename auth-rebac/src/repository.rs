use crate::{
    error::ConfigLoadError,
    models::{normalize_subject, Relationship, UserRelationship},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Storage seam for relationship tuples.
pub trait RelationshipRepository: Send + Sync {
    /// Snapshot of every tuple in insertion order.
    fn list(&self) -> Vec<Relationship>;

    /// Append a tuple. Duplicates are kept.
    fn add(&self, relationship: Relationship) -> bool;

    /// Remove the first exact match, if any.
    fn remove(&self, relationship: &Relationship) -> bool;

    /// `(resource, relation)` pairs held by `user`, optionally for one resource.
    fn relationships_for_user(&self, user: &str, resource: Option<&str>) -> Vec<UserRelationship>;

    /// True if any tuple for (`subject`, `resource`) satisfies `grants`.
    ///
    /// `subject` must already be normalized.
    fn any_grant(&self, subject: &str, resource: &str, grants: &dyn Fn(&str) -> bool) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// On-disk layout of the relationships file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationshipConfig {
    pub relationships: Vec<Relationship>,
}

/// In-memory relationship list guarded by a reader/writer lock.
///
/// Mutations are visible to the next check and are lost on restart.
#[derive(Debug, Default)]
pub struct RelationshipStore {
    relationships: RwLock<Vec<Relationship>>,
}

impl RelationshipStore {
    pub fn new(relationships: Vec<Relationship>) -> Self {
        Self {
            relationships: RwLock::new(relationships),
        }
    }

    /// Load the baseline tuples from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_yaml_str(&source)?;
        info!(
            path = %path.display(),
            relationships = store.len(),
            "Loaded relationships"
        );
        Ok(store)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigLoadError> {
        let config: RelationshipConfig = serde_yaml::from_str(source)?;
        Ok(Self::new(config.relationships))
    }
}

impl RelationshipRepository for RelationshipStore {
    fn list(&self) -> Vec<Relationship> {
        self.relationships.read().clone()
    }

    fn add(&self, relationship: Relationship) -> bool {
        info!(relationship = %relationship, "Adding relationship");
        self.relationships.write().push(relationship);
        true
    }

    fn remove(&self, relationship: &Relationship) -> bool {
        let mut relationships = self.relationships.write();
        match relationships.iter().position(|r| r == relationship) {
            Some(index) => {
                relationships.remove(index);
                info!(relationship = %relationship, "Removed relationship");
                true
            }
            None => {
                warn!(relationship = %relationship, "Relationship to remove not found");
                false
            }
        }
    }

    fn relationships_for_user(&self, user: &str, resource: Option<&str>) -> Vec<UserRelationship> {
        let user = normalize_subject(user);
        let resource = resource.filter(|r| !r.is_empty());

        self.relationships
            .read()
            .iter()
            .filter(|r| r.normalized_subject() == user)
            .filter(|r| resource.map_or(true, |wanted| r.resource == wanted))
            .map(|r| UserRelationship {
                resource: r.resource.clone(),
                relation: r.relation.clone(),
            })
            .collect()
    }

    fn any_grant(&self, subject: &str, resource: &str, grants: &dyn Fn(&str) -> bool) -> bool {
        self.relationships
            .read()
            .iter()
            .filter(|r| r.normalized_subject() == subject && r.resource == resource)
            .any(|r| grants(&r.relation))
    }

    fn len(&self) -> usize {
        self.relationships.read().len()
    }
}
