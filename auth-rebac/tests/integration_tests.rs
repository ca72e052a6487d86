//! Integration tests for the relationship-based authorization engine
//!
//! These cover the system-service scenarios:
//! 1. Owner can delete, strangers cannot, other resources are untouched
//! 2. `user:` prefixes are ignored on either side
//! 3. Global admin override
//! 4. Engine loaded from schema and relationship files
//! 5. Concurrent writers and readers on the shared store

use auth_rebac::*;
use std::io::Write;
use std::sync::Arc;

const SYSTEM_SCHEMA: &str = r#"
// system-service authorization model
definition user {}

definition global {
    relation admin: user
    permission full_access = admin
}

definition system {
    relation owner: user
    relation manager: user
    relation staff: user

    permission read = owner + manager + staff
    permission write = owner + manager
    permission delete = owner
    permission manage_members = owner
}

definition document {
    relation owner: user
    permission delete = owner
}
"#;

const RELATIONSHIPS: &str = r#"
relationships:
  - resource: "global:main"
    relation: admin
    subject: "user:root"
  - resource: "system:1"
    relation: owner
    subject: "user:alice"
  - resource: "system:1"
    relation: staff
    subject: "bob"
  - resource: "document:42"
    relation: owner
    subject: alice
"#;

fn create_test_engine() -> Arc<AuthorizationEngine> {
    let schema = Schema::parse(SYSTEM_SCHEMA).unwrap();
    let store = RelationshipStore::from_yaml_str(RELATIONSHIPS).unwrap();
    Arc::new(AuthorizationEngine::new(schema, Arc::new(store)))
}

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_document_owner_scenario() {
    let engine = create_test_engine();

    assert!(engine.check("alice", "document:42", "delete"));
    assert!(!engine.check("bob", "document:42", "delete"));
    assert!(!engine.check("alice", "document:43", "delete"));
}

#[test]
fn test_prefix_insensitive_subjects() {
    let engine = create_test_engine();

    // stored as "alice", asked as "user:alice"
    assert!(engine.check("user:alice", "document:42", "delete"));
    // stored as "user:alice", asked as "alice"
    assert!(engine.check("alice", "system:1", "manage_members"));

    let roles = engine.relationships_for_user("user:bob", None);
    assert_eq!(
        roles,
        vec![UserRelationship {
            resource: "system:1".to_string(),
            relation: "staff".to_string(),
        }]
    );
}

#[test]
fn test_staff_permissions() {
    let engine = create_test_engine();

    assert!(engine.check("bob", "system:1", "read"));
    assert!(!engine.check("bob", "system:1", "write"));
    assert!(!engine.check("bob", "system:1", "manage_members"));
}

#[test]
fn test_global_admin_bypasses_everything() {
    let engine = create_test_engine();

    assert!(engine.check_with_global_override("root", "any:resource", "any:permission"));
    assert!(engine.check_with_global_override("user:root", "system:1", "manage_members"));
    assert!(!engine.check("root", "system:1", "manage_members"));

    // ordinary users still fall through to the fine-grained check
    assert!(engine.check_with_global_override("bob", "system:1", "read"));
    assert!(!engine.check_with_global_override("bob", "system:1", "delete"));
}

#[test]
fn test_sentinel_is_configurable() {
    let schema = Schema::parse(SYSTEM_SCHEMA).unwrap();
    let store = RelationshipStore::from_yaml_str(RELATIONSHIPS).unwrap();
    let engine = AuthorizationEngine::new(schema, Arc::new(store))
        .with_sentinel(GlobalAdminSentinel::new("system:1", "manage_members"));

    // alice owns system:1, which is now the sentinel grant
    assert!(engine.is_global_admin("alice"));
    assert!(engine.check_with_global_override("alice", "system:99", "delete"));
    // root's admin tuple no longer means anything special
    assert!(!engine.check_with_global_override("root", "system:99", "delete"));
}

#[test]
fn test_runtime_mutations() {
    let engine = create_test_engine();
    let grant = Relationship::new("system:2", "manager", "carol");

    assert!(!engine.check("carol", "system:2", "write"));
    assert!(engine.add_relationship(grant.clone()));
    assert!(engine.check("carol", "system:2", "write"));

    assert!(engine.remove_relationship(&grant));
    assert!(!engine.remove_relationship(&grant));
    assert!(!engine.check("carol", "system:2", "write"));
}

#[test]
fn test_empty_schema_denies_everything() {
    let store = RelationshipStore::from_yaml_str(RELATIONSHIPS).unwrap();
    let engine = AuthorizationEngine::new(Schema::parse("").unwrap(), Arc::new(store));

    assert!(engine.permission_map().is_empty());
    assert!(!engine.check("alice", "document:42", "delete"));
    assert!(!engine.check_with_global_override("root", "system:1", "read"));
}

#[test]
fn test_from_sources() {
    let schema_file = write_temp(SYSTEM_SCHEMA);
    let relationships_file = write_temp(RELATIONSHIPS);

    let engine = AuthorizationEngine::from_sources(
        schema_file.path(),
        relationships_file.path(),
        GlobalAdminSentinel::new("global:main", "full_access"),
    )
    .unwrap();

    assert_eq!(engine.schema().definition_count(), 4);
    assert_eq!(engine.relationships().len(), 4);
    assert!(engine.check("alice", "system:1", "delete"));
}

#[test]
fn test_from_sources_fails_fast() {
    let schema_file = write_temp(SYSTEM_SCHEMA);
    let bad_relationships = write_temp("relationships: {not: [a list");

    let err = AuthorizationEngine::from_sources(
        schema_file.path(),
        bad_relationships.path(),
        GlobalAdminSentinel::default(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, RebacError::Config(ConfigLoadError::Parse(_))));

    let bad_schema = write_temp("nothing to see here");
    let relationships_file = write_temp(RELATIONSHIPS);
    let err = AuthorizationEngine::from_sources(
        bad_schema.path(),
        relationships_file.path(),
        GlobalAdminSentinel::default(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, RebacError::Schema(SchemaLoadError::NoDefinitions)));
}

#[test]
fn test_principal_feeds_checks() {
    let engine = create_test_engine();

    let alice = Principal::from_header(Some("alice"));
    assert!(engine.check_with_global_override(alice.as_subject(), "system:1", "read"));

    let nobody = Principal::from_header(None);
    assert_eq!(nobody.as_subject(), ANONYMOUS);
    assert!(!engine.check_with_global_override(nobody.as_subject(), "system:1", "read"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_and_readers() {
    let engine = create_test_engine();
    let baseline = engine.relationships().len();

    let mut handles = Vec::new();
    for i in 0..16 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            let subject = format!("worker{}", i);
            let kept = Relationship::new("system:shared", "staff", &subject);
            engine.add_relationship(kept);

            for round in 0..200 {
                let transient = Relationship::new(&format!("system:w{}-{}", i, round), "owner", &subject);
                engine.add_relationship(transient.clone());
                assert!(engine.check(&subject, &transient.resource, "delete"));
                assert!(engine.check(&subject, "system:shared", "read"));
                assert!(engine.remove_relationship(&transient));
                assert!(!engine.check(&subject, &transient.resource, "delete"));

                // baseline grants never flicker under concurrent writes
                assert!(engine.check("alice", "system:1", "read"));
                tokio::task::yield_now().await;
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(engine.relationships().len(), baseline + 16);
    for i in 0..16 {
        assert!(engine.check(&format!("user:worker{}", i), "system:shared", "read"));
    }
}
