//! Schema data model
//!
//! Named schema definitions as served by the registrar. A schema owns an
//! ordered collection of fields, keyed by wire position; it is immutable
//! once decoded from registry data.

pub mod field;

pub use field::{FieldType, SchemaField, SqlInfo};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

/// A named schema definition
///
/// Wire representation:
///
/// ```json
/// {
///   "name": "FrontDoorVisit",
///   "schema": [ { "name": "fileName", "type": "string", "position": 1 } ],
///   "sinkAddInfo": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSchema")]
pub struct Schema {
    /// Schema name, unique within a registry
    name: String,

    /// Fields keyed by wire position
    #[serde(rename = "schema", serialize_with = "fields_in_position_order")]
    fields: BTreeMap<u16, SchemaField>,

    /// Sink routing information passed through from the registrar
    #[serde(rename = "sinkAddInfo", skip_serializing_if = "Option::is_none")]
    sink_add_info: Option<String>,
}

impl Schema {
    /// Build a schema from fields in fetch order
    ///
    /// Fields sharing a position keep the last one seen.
    pub fn new(name: impl Into<String>, fields: Vec<SchemaField>) -> Self {
        let mut by_position = BTreeMap::new();
        for field in fields {
            by_position.insert(field.position, field);
        }

        Self {
            name: name.into(),
            fields: by_position,
            sink_add_info: None,
        }
    }

    /// Schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in position order
    pub fn fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.values()
    }

    /// Number of fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Field at the given wire position
    pub fn field_by_position(&self, position: u16) -> Option<&SchemaField> {
        self.fields.get(&position)
    }

    /// First field carrying the given name, in position order
    pub fn field_by_name(&self, name: &str) -> Option<&SchemaField> {
        self.fields.values().find(|field| field.name == name)
    }

    /// Sink routing information, when the registrar provided any
    pub fn sink_add_info(&self) -> Option<&str> {
        self.sink_add_info.as_deref()
    }
}

fn fields_in_position_order<S>(
    fields: &BTreeMap<u16, SchemaField>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(fields.values())
}

/// Decoded wire form of a schema
#[derive(Deserialize)]
struct RawSchema {
    name: String,
    #[serde(default, rename = "schema")]
    fields: Vec<SchemaField>,
    #[serde(default, rename = "sinkAddInfo")]
    sink_add_info: Option<String>,
}

impl From<RawSchema> for Schema {
    fn from(raw: RawSchema) -> Self {
        let mut schema = Schema::new(raw.name, raw.fields);
        schema.sink_add_info = raw.sink_add_info;
        schema
    }
}
