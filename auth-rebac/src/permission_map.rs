use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Answers "does holding `relation` grant `permission`?".
///
/// The checker only talks to this trait, so a type-scoped resolver can
/// replace the flat map below without touching callers.
pub trait PermissionResolver: Send + Sync {
    fn permits(&self, relation: &str, permission: &str) -> bool;
}

/// Relation name -> permissions whose expression mentions it.
///
/// Relation names are not qualified by definition: `owner` on `system`
/// and `owner` on `account` share one entry. Membership is a plain
/// substring test on the expression text, so `manager` also matches an
/// expression naming `managers_extended`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMap {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl PermissionMap {
    pub fn build(schema: &Schema) -> Self {
        let mut entries: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for definition in schema.definitions.values() {
            for relation in definition.relations.keys() {
                let granted = definition
                    .permissions
                    .iter()
                    .filter(|(_, expression)| expression.contains(relation.as_str()))
                    .map(|(permission, _)| permission.clone());

                let mut granted = granted.peekable();
                if granted.peek().is_some() {
                    entries.entry(relation.clone()).or_default().extend(granted);
                }
            }
        }

        for (relation, permissions) in &entries {
            debug!(relation = %relation, ?permissions, "Mapped relation to permissions");
        }

        Self { entries }
    }

    pub fn permissions_for(&self, relation: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(relation)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PermissionResolver for PermissionMap {
    fn permits(&self, relation: &str, permission: &str) -> bool {
        self.entries
            .get(relation)
            .is_some_and(|permissions| permissions.contains(permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(source: &str) -> Schema {
        Schema::parse(source).unwrap()
    }

    #[test]
    fn test_build_from_expressions() {
        let map = PermissionMap::build(&schema(
            "definition document {\n relation owner: user\n relation viewer: user\n permission delete = owner\n permission view = owner + viewer\n}\n",
        ));

        let owner: Vec<_> = map.permissions_for("owner").unwrap().iter().cloned().collect();
        assert_eq!(owner, vec!["delete".to_string(), "view".to_string()]);
        assert!(map.permits("viewer", "view"));
        assert!(!map.permits("viewer", "delete"));
    }

    #[test]
    fn test_relations_merge_across_definitions() {
        let map = PermissionMap::build(&schema(
            "definition system {\n relation owner: user\n permission manage_members = owner\n}\ndefinition account {\n relation owner: user\n permission close = owner\n}\n",
        ));

        assert_eq!(map.len(), 1);
        assert!(map.permits("owner", "manage_members"));
        assert!(map.permits("owner", "close"));
    }

    #[test]
    fn test_substring_matching_is_coarse() {
        let map = PermissionMap::build(&schema(
            "definition team {\n relation manager: user\n permission extend = managers_extended\n}\n",
        ));
        assert!(map.permits("manager", "extend"));
    }

    #[test]
    fn test_relation_without_permissions_is_absent() {
        let map = PermissionMap::build(&schema(
            "definition doc {\n relation owner: user\n relation auditor: user\n permission edit = owner\n}\n",
        ));
        assert!(map.permissions_for("auditor").is_none());
        // expressions in other definitions are not consulted
        let map = PermissionMap::build(&schema(
            "definition a {\n relation owner: user\n}\ndefinition b {\n permission edit = owner\n}\n",
        ));
        assert!(map.is_empty());
    }

    #[test]
    fn test_empty_schema_gives_empty_map() {
        assert!(PermissionMap::build(&Schema::new()).is_empty());
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let map = PermissionMap::build(&schema(
            "definition doc {\n relation owner: user\n permission edit = owner\n permission delete = owner\n}\n",
        ));
        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            serde_json::json!({ "owner": ["delete", "edit"] })
        );
    }
}
