use crate::error::SchemaLoadError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

lazy_static! {
    #[allow(clippy::unwrap_used)]
    static ref DEFINITION_REGEX: Regex = Regex::new(r"^definition\s+(\w+)\s*\{").unwrap();
    #[allow(clippy::unwrap_used)]
    static ref RELATION_REGEX: Regex = Regex::new(r"^relation\s+(\w+):\s*(\w+)").unwrap();
    #[allow(clippy::unwrap_used)]
    static ref PERMISSION_REGEX: Regex = Regex::new(r"^permission\s+(\w+)\s*=\s*(.+)").unwrap();
}

/// Parsed schema: object definitions keyed by name.
///
/// The grammar is line oriented:
///
/// ```text
/// definition system {
///     relation owner: user
///     relation staff: user
///     permission read = owner + staff
/// }
/// ```
///
/// Only the relation's first subject-type token is kept and permission
/// expressions are stored verbatim; nothing is cross-checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub definitions: BTreeMap<String, Definition>,
}

/// One object type and its relations and permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub name: String,
    /// relation name -> accepted subject type
    pub relations: BTreeMap<String, String>,
    /// permission name -> raw expression
    pub permissions: BTreeMap<String, String>,
}

impl Definition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a schema file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaLoadError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SchemaLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let schema = Self::parse(&source)?;
        info!(
            path = %path.display(),
            definitions = schema.definition_count(),
            "Loaded schema"
        );
        Ok(schema)
    }

    /// Parse schema text.
    ///
    /// Comment-only or empty input gives an empty schema; input with content
    /// but no recognisable `definition` header is rejected.
    pub fn parse(source: &str) -> Result<Self, SchemaLoadError> {
        let mut schema = Self::new();
        let mut current: Option<String> = None;
        let mut saw_content = false;

        for raw in source.lines() {
            let line = raw.trim();
            if is_skippable(line) {
                continue;
            }
            saw_content = true;

            if let Some(caps) = DEFINITION_REGEX.captures(line) {
                let name = caps[1].to_string();
                schema
                    .definitions
                    .insert(name.clone(), Definition::new(&name));
                current = Some(name);
                continue;
            }

            if let Some(definition) = current
                .as_ref()
                .and_then(|name| schema.definitions.get_mut(name))
            {
                if let Some(caps) = RELATION_REGEX.captures(line) {
                    definition
                        .relations
                        .insert(caps[1].to_string(), caps[2].to_string());
                    continue;
                }

                if let Some(caps) = PERMISSION_REGEX.captures(line) {
                    definition
                        .permissions
                        .insert(caps[1].to_string(), caps[2].trim().to_string());
                    continue;
                }
            }

            if line == "}" {
                current = None;
            }
        }

        if saw_content && schema.definitions.is_empty() {
            return Err(SchemaLoadError::NoDefinitions);
        }

        for definition in schema.definitions.values() {
            debug!(
                definition = %definition.name,
                relations = definition.relations.len(),
                permissions = definition.permissions.len(),
                "Parsed definition"
            );
        }

        Ok(schema)
    }

    pub fn definition(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with("//") || line.starts_with("/*") || line.starts_with('*')
}
