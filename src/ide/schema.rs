//! Variable → schema registry for schema-aware autocomplete.
//!
//! Documents may be OpenAPI 3 (`components.schemas`), Swagger 2
//! (`definitions`) or a plain JSON Schema. A [`ChainDescriptor`] produced by
//! inference is resolved by walking `properties` for keys and `items` for
//! `"[]"`, following local `$ref`s on the way.
//!
//! Failures never panic; host-facing setters report them as an
//! [`ErrorDescription`].

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::chain::{ARRAY_ELEMENT, ChainDescriptor};

/// Guard against `$ref` cycles
const MAX_REF_DEPTH: usize = 32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("variable name must not be empty")]
    EmptyVariableName,

    #[error("invalid schema JSON: {0}")]
    InvalidJson(String),

    #[error("type {0:?} is not defined in the schema")]
    TypeNotFound(String),
}

/// Failure shape handed back to the host integration layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescription {
    #[serde(rename = "errorDescription")]
    pub error_description: String,
}

impl From<SchemaError> for ErrorDescription {
    fn from(err: SchemaError) -> Self {
        Self {
            error_description: err.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct SchemaEntry {
    document: Arc<Value>,
    type_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    /// Keyed by lowercased variable name, in registration order
    entries: IndexMap<String, SchemaEntry>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered variable names (lowercased), oldest first
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Bind `variable` to `type_name` inside the JSON document `schema`.
    pub fn set_variable_schema(
        &mut self,
        variable: &str,
        schema: &str,
        type_name: &str,
    ) -> Result<(), ErrorDescription> {
        let document: Value =
            serde_json::from_str(schema).map_err(|e| SchemaError::InvalidJson(e.to_string()))?;
        self.set_variable_schema_value(variable, Arc::new(document), type_name)
            .map_err(ErrorDescription::from)
    }

    pub fn set_variable_schema_value(
        &mut self,
        variable: &str,
        document: Arc<Value>,
        type_name: &str,
    ) -> Result<(), SchemaError> {
        if variable.trim().is_empty() {
            return Err(SchemaError::EmptyVariableName);
        }
        if find_type(&document, type_name).is_none() {
            return Err(SchemaError::TypeNotFound(type_name.to_string()));
        }

        tracing::debug!("[Schema] {} → {}", variable, type_name);
        self.entries.insert(
            variable.to_lowercase(),
            SchemaEntry {
                document,
                type_name: type_name.to_string(),
            },
        );
        Ok(())
    }

    /// Register every type found in `schema` under its own name.
    ///
    /// Returns the registered type names; invalid JSON registers nothing.
    pub fn load_schema_file(&mut self, schema: &str) -> Vec<String> {
        let document: Value = match serde_json::from_str(schema) {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!("[Schema] load_schema_file: {}", err);
                return Vec::new();
            }
        };
        let document = Arc::new(document);

        let names: Vec<String> = if let Some(schemas) = openapi_schemas(&document) {
            schemas.keys().cloned().collect()
        } else if let Some(defs) = swagger_definitions(&document) {
            defs.keys().cloned().collect()
        } else if is_plain_schema(&document) {
            let title = document
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("Schema");
            vec![title.to_string()]
        } else {
            Vec::new()
        };

        names
            .into_iter()
            .filter(|name| {
                self.set_variable_schema_value(name, Arc::clone(&document), name)
                    .is_ok()
            })
            .collect()
    }

    pub fn remove_variable_schema(&mut self, variable: &str) {
        self.entries.shift_remove(&variable.to_lowercase());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Schema node `descriptor` points at, with `$ref`s followed
    pub fn resolve(&self, descriptor: &ChainDescriptor) -> Option<&Value> {
        let entry = self.entries.get(&descriptor.base.to_lowercase())?;
        let document = entry.document.as_ref();
        let mut node = deref(document, find_type(document, &entry.type_name)?)?;

        for key in &descriptor.chain {
            let next = if key == ARRAY_ELEMENT {
                node.get("items")
            } else {
                property(node, key)
            };
            match next {
                Some(next) => node = deref(document, next)?,
                None => {
                    tracing::trace!("[Schema] no {:?} under {}", key, descriptor.base);
                    return None;
                }
            }
        }
        Some(node)
    }

    /// Property names available on the value `descriptor` points at
    pub fn property_names(&self, descriptor: &ChainDescriptor) -> Vec<String> {
        self.resolve(descriptor)
            .and_then(|node| node.get("properties"))
            .and_then(Value::as_object)
            .map(|props| props.keys().cloned().collect())
            .unwrap_or_default()
    }
}

fn openapi_schemas(document: &Value) -> Option<&serde_json::Map<String, Value>> {
    document.get("openapi")?;
    document.pointer("/components/schemas")?.as_object()
}

fn swagger_definitions(document: &Value) -> Option<&serde_json::Map<String, Value>> {
    document.get("swagger")?;
    document.get("definitions")?.as_object()
}

fn is_plain_schema(document: &Value) -> bool {
    ["type", "properties", "$ref"]
        .iter()
        .any(|key| document.get(*key).is_some())
}

fn find_type<'d>(document: &'d Value, type_name: &str) -> Option<&'d Value> {
    if let Some(node) = document
        .pointer("/components/schemas")
        .and_then(|schemas| schemas.get(type_name))
    {
        return Some(node);
    }
    if let Some(node) = document
        .get("definitions")
        .and_then(|defs| defs.get(type_name))
    {
        return Some(node);
    }
    is_plain_schema(document).then_some(document)
}

/// Follow local `$ref`s (`#/...`) until a concrete schema is reached
fn deref<'d>(document: &'d Value, mut node: &'d Value) -> Option<&'d Value> {
    for _ in 0..MAX_REF_DEPTH {
        match node.get("$ref").and_then(Value::as_str) {
            Some(reference) => {
                let pointer = reference.strip_prefix('#')?;
                node = document.pointer(pointer)?;
            }
            None => return Some(node),
        }
    }
    tracing::warn!("[Schema] $ref chain too deep");
    None
}

/// Property lookup: exact key first, then ignoring case
fn property<'d>(node: &'d Value, key: &str) -> Option<&'d Value> {
    let props = node.get("properties")?.as_object()?;
    if let Some(value) = props.get(key) {
        return Some(value);
    }
    let key = key.to_lowercase();
    props
        .iter()
        .find(|(name, _)| name.to_lowercase() == key)
        .map(|(_, value)| value)
}
