use crate::error::RebacError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix optionally carried by user subjects (`user:alice`).
pub const USER_PREFIX: &str = "user:";

/// Strip a single leading `user:` prefix, if present.
pub fn normalize_subject(subject: &str) -> &str {
    subject.strip_prefix(USER_PREFIX).unwrap_or(subject)
}

/// A granted role: `subject` holds `relation` on `resource`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub resource: String,
    pub relation: String,
    pub subject: String,
}

impl Relationship {
    pub fn new(resource: &str, relation: &str, subject: &str) -> Self {
        Self {
            resource: resource.to_string(),
            relation: relation.to_string(),
            subject: subject.to_string(),
        }
    }

    /// Subject with any `user:` prefix removed.
    pub fn normalized_subject(&self) -> &str {
        normalize_subject(&self.subject)
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}@{}", self.resource, self.relation, self.subject)
    }
}

/// A relationship seen from one user's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRelationship {
    pub resource: String,
    pub relation: String,
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AuthDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(subject: &str, resource: &str, permission: &str) -> Self {
        Self {
            allowed: false,
            reason: Some(format!(
                "User {} does not have {} permission on {}",
                subject, permission, resource
            )),
        }
    }
}

/// Resource/permission pair whose grant bypasses every other check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalAdminSentinel {
    pub resource: String,
    pub permission: String,
}

impl GlobalAdminSentinel {
    pub fn new(resource: &str, permission: &str) -> Self {
        Self {
            resource: resource.to_string(),
            permission: permission.to_string(),
        }
    }
}

impl Default for GlobalAdminSentinel {
    fn default() -> Self {
        Self::new("global:main", "full_access")
    }
}

/// A resource string split into its `type` and `id` halves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub resource_type: String,
    pub resource_id: String,
}

impl ResourceRef {
    pub fn new(resource_type: &str, resource_id: &str) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
        }
    }

    /// Split `type:id` on the first separator.
    pub fn parse(resource: &str) -> Result<Self, RebacError> {
        match resource.split_once(':') {
            Some((resource_type, resource_id))
                if !resource_type.is_empty() && !resource_id.is_empty() =>
            {
                Ok(Self::new(resource_type, resource_id))
            }
            _ => Err(RebacError::InvalidResource(resource.to_string())),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource_id)
    }
}
