use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use serde_json::Value;

use crate::builtin_schemas::builtin_schemas;
use crate::error::MarkerError;
use crate::fast_hash_map::{FastHashMap, FastIndexMap};
use crate::markers::{LabelMaker, MarkerSchema};
use crate::payload::MarkerPayload;

/// The marker schemas of a profiling session, keyed by marker type name.
///
/// The registry is built once when a profile is loaded and only read afterwards.
/// Tooltip label templates are compiled when a schema is registered.
///
/// Serializes as a `markerSchema` array, in registration order.
#[derive(Debug, Clone, Default)]
pub struct MarkerSchemaRegistry {
    schemas: FastIndexMap<String, MarkerSchema>,
    tooltip_label_makers: FastHashMap<String, LabelMaker>,
}

impl MarkerSchemaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with a schema for every payload type.
    pub fn with_builtin_schemas() -> Self {
        let mut registry = Self::new();
        for schema in builtin_schemas() {
            registry.register(schema);
        }
        registry
    }

    /// Adds a schema, replacing any schema with the same name.
    pub fn register(&mut self, schema: MarkerSchema) {
        let label_maker = schema
            .tooltip_label
            .as_deref()
            .and_then(|template| LabelMaker::compile(template, &schema));
        match label_maker {
            Some(label_maker) => {
                self.tooltip_label_makers
                    .insert(schema.name.clone(), label_maker);
            }
            None => {
                self.tooltip_label_makers.remove(&schema.name);
            }
        }
        if let Some(old) = self.schemas.insert(schema.name.clone(), schema) {
            log::warn!("Replacing the marker schema for {:?}", old.name);
        }
    }

    /// Registers the schemas from a `markerSchema` JSON array, or from an object
    /// which has such an array under `markerSchema` or `meta.markerSchema`, such as a
    /// processed profile. Returns the number of registered schemas.
    ///
    /// Nothing is registered if any of the schemas fails to parse.
    pub fn extend_from_json(&mut self, json: &Value) -> Result<usize, MarkerError> {
        let list = match json {
            Value::Array(_) => json,
            Value::Object(object) => object
                .get("markerSchema")
                .or_else(|| json.pointer("/meta/markerSchema"))
                .ok_or(MarkerError::SchemaListNotAnArray)?,
            _ => return Err(MarkerError::SchemaListNotAnArray),
        };
        if !list.is_array() {
            return Err(MarkerError::SchemaListNotAnArray);
        }
        let schemas = Vec::<MarkerSchema>::deserialize(list).map_err(MarkerError::InvalidSchema)?;
        let count = schemas.len();
        for schema in schemas {
            self.register(schema);
        }
        Ok(count)
    }

    pub fn lookup(&self, type_name: &str) -> Option<&MarkerSchema> {
        self.schemas.get(type_name)
    }

    pub fn lookup_for_payload(&self, payload: &MarkerPayload) -> Option<&MarkerSchema> {
        self.lookup(payload.schema_name())
    }

    /// The compiled tooltip label of a schema. `None` if the schema has no tooltip
    /// label, or if the label refers to fields the schema doesn't declare.
    pub fn label_maker(&self, type_name: &str) -> Option<&LabelMaker> {
        self.tooltip_label_makers.get(type_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkerSchema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl Serialize for MarkerSchemaRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.schemas.values())
    }
}
