//! Property tests for the relationship store and the checker

use auth_rebac::*;
use proptest::prelude::*;
use std::sync::Arc;

const SCHEMA: &str = r#"
definition system {
    relation owner: user
    relation staff: user
    permission read = owner + staff
    permission write = owner
}
"#;

fn engine_with(relationships: Vec<Relationship>) -> AuthorizationEngine {
    AuthorizationEngine::new(
        Schema::parse(SCHEMA).unwrap(),
        Arc::new(RelationshipStore::new(relationships)),
    )
}

fn relationship() -> impl Strategy<Value = Relationship> {
    (
        prop::sample::select(vec!["system:1", "system:2", "system:3"]),
        prop::sample::select(vec!["owner", "staff", "viewer"]),
        prop::sample::select(vec!["alice", "user:alice", "bob", "user:carol"]),
    )
        .prop_map(|(resource, relation, subject)| Relationship::new(resource, relation, subject))
}

fn query() -> impl Strategy<Value = (String, String, String)> {
    (
        prop::sample::select(vec!["alice", "user:bob", "carol"]),
        prop::sample::select(vec!["system:1", "system:2", "system:3"]),
        prop::sample::select(vec!["read", "write", "delete"]),
    )
        .prop_map(|(s, r, p)| (s.to_string(), r.to_string(), p.to_string()))
}

proptest! {
    #[test]
    fn added_tuples_are_visible_to_their_user(
        existing in prop::collection::vec(relationship(), 0..8),
        added in relationship(),
    ) {
        let engine = engine_with(existing);
        engine.add_relationship(added.clone());

        let roles = engine.relationships_for_user(&added.subject, None);
        let expected = UserRelationship {
            resource: added.resource.clone(),
            relation: added.relation.clone(),
        };
        prop_assert!(roles.contains(&expected));

        // the other spelling of the subject sees it too
        let other = match added.subject.strip_prefix("user:") {
            Some(bare) => bare.to_string(),
            None => format!("user:{}", added.subject),
        };
        prop_assert!(!engine.relationships_for_user(&other, Some(added.resource.as_str())).is_empty());
    }

    #[test]
    fn remove_after_single_add_succeeds_once(added in relationship()) {
        let engine = engine_with(Vec::new());
        engine.add_relationship(added.clone());

        prop_assert!(engine.remove_relationship(&added));
        prop_assert!(!engine.remove_relationship(&added));
    }

    #[test]
    fn check_is_monotonic(
        existing in prop::collection::vec(relationship(), 0..8),
        added in relationship(),
        (subject, resource, permission) in query(),
    ) {
        let engine = engine_with(existing);
        let before = engine.check(&subject, &resource, &permission);
        engine.add_relationship(added);
        let after = engine.check(&subject, &resource, &permission);

        prop_assert!(!before || after);
    }

    #[test]
    fn check_is_idempotent(
        existing in prop::collection::vec(relationship(), 0..8),
        (subject, resource, permission) in query(),
    ) {
        let engine = engine_with(existing);
        let first = engine.check(&subject, &resource, &permission);
        for _ in 0..3 {
            prop_assert_eq!(engine.check(&subject, &resource, &permission), first);
        }
    }

    #[test]
    fn scan_order_does_not_matter(
        existing in prop::collection::vec(relationship(), 0..8),
        (subject, resource, permission) in query(),
    ) {
        let mut reversed = existing.clone();
        reversed.reverse();

        prop_assert_eq!(
            engine_with(existing).check(&subject, &resource, &permission),
            engine_with(reversed).check(&subject, &resource, &permission)
        );
    }
}
