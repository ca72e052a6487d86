//! Relationship-based authorization engine
//!
//! This crate decides whether a subject holds a permission on a resource:
//! - a line-oriented schema of object definitions, relations and permissions
//! - a flat relation -> permission map derived from permission expressions
//! - an in-memory, lock-guarded store of (resource, relation, subject) tuples
//! - a checker with a "global admin" override
//!
//! # Core Concepts
//!
//! - **Definition**: an object type with named relations and permissions
//! - **Relation**: a role a subject can hold on a resource (e.g. owner, staff)
//! - **Permission**: a capability granted by any relation its expression mentions
//! - **Relationship**: a concrete grant, e.g. `system:1#owner@user:alice`
//!
//! Permission expressions are never evaluated. A relation grants a
//! permission when the relation's name occurs anywhere in the expression
//! text of the same definition.
//!
//! # Example
//!
//! ```rust
//! use auth_rebac::{AuthorizationEngine, Relationship, RelationshipStore, Schema};
//! use std::sync::Arc;
//!
//! let schema = Schema::parse(
//!     "definition document {\n relation owner: user\n permission delete = owner\n}\n",
//! )?;
//! let engine = AuthorizationEngine::new(schema, Arc::new(RelationshipStore::default()));
//!
//! engine.add_relationship(Relationship::new("document:42", "owner", "alice"));
//!
//! assert!(engine.check("user:alice", "document:42", "delete"));
//! assert!(!engine.check("bob", "document:42", "delete"));
//! # Ok::<(), auth_rebac::SchemaLoadError>(())
//! ```

pub mod models;
pub mod engine;
pub mod repository;
pub mod schema;
pub mod permission_map;
pub mod check;
pub mod principal;
pub mod error;

pub use models::*;
pub use engine::*;
pub use repository::{RelationshipConfig, RelationshipRepository, RelationshipStore};
pub use schema::*;
pub use permission_map::{PermissionMap, PermissionResolver};
pub use check::PermissionChecker;
pub use principal::{Principal, ANONYMOUS};
pub use error::*;
