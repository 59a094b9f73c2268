//! Schema field definitions
//!
//! A field couples the registry-side type information with optional metadata
//! for the SQL sink (type name, length, scale, precision). Downstream
//! warehouses vary too much for the SQL type to be anything but a plain
//! string; the only rule enforced is that string columns carry no scale or
//! precision.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Registry field types
///
/// Parsed case-insensitively from the wire; the historical short forms
/// (`i8`, `i16`, `i32`, `i64`, `bool`) are accepted as aliases. Serializes
/// as the uppercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldType {
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Double,
    String,
    Date,
    Ip,
}

impl FieldType {
    /// Wire name of the type, as the registrar serializes it
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Boolean => "BOOLEAN",
            FieldType::Byte => "BYTE",
            FieldType::Short => "SHORT",
            FieldType::Integer => "INTEGER",
            FieldType::Long => "LONG",
            FieldType::Double => "DOUBLE",
            FieldType::String => "STRING",
            FieldType::Date => "DATE",
            FieldType::Ip => "IP",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BOOLEAN" | "BOOL" => Ok(FieldType::Boolean),
            "BYTE" | "I8" => Ok(FieldType::Byte),
            "SHORT" | "I16" => Ok(FieldType::Short),
            "INTEGER" | "INT" | "I32" => Ok(FieldType::Integer),
            "LONG" | "I64" => Ok(FieldType::Long),
            "DOUBLE" => Ok(FieldType::Double),
            "STRING" => Ok(FieldType::String),
            "DATE" => Ok(FieldType::Date),
            "IP" => Ok(FieldType::Ip),
            _ => Err(SchemaError::UnknownFieldType {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for FieldType {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.as_str().to_string()
    }
}

/// Extra metadata for the SQL sink attached to a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlInfo {
    /// SQL type name (varchar, decimal, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub sql_type: Option<String>,

    /// Type length, for character types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    /// Numeric scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,

    /// Numeric precision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
}

impl SqlInfo {
    /// Human readable SQL type, e.g. `varchar(255)` or `decimal(10, 2)`
    ///
    /// Decimal types render their precision and scale, character types their
    /// length; everything else is the bare type name. `None` when no SQL
    /// type is set.
    pub fn full_sql_type(&self) -> Option<String> {
        let sql_type = self.sql_type.as_deref()?;

        let rendered = match sql_type {
            "decimal" | "numeric" => match (self.precision, self.scale) {
                (Some(precision), Some(scale)) => format!("{sql_type}({precision}, {scale})"),
                (Some(precision), None) => format!("{sql_type}({precision})"),
                _ => sql_type.to_string(),
            },
            "varchar" | "nvarchar" => match self.length {
                Some(length) => format!("{sql_type}({length})"),
                None => sql_type.to_string(),
            },
            _ => sql_type.to_string(),
        };

        Some(rendered)
    }
}

/// A single field of a schema
///
/// Wire representation:
///
/// ```json
/// {
///   "name": "fileName",
///   "type": "string",
///   "position": 1,
///   "description": "Name of the file attached to a blob",
///   "sql": { "type": "varchar", "length": 255 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSchemaField")]
pub struct SchemaField {
    /// Field name
    pub name: String,

    /// Registry type of the field
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Position of the field in the schema
    pub position: u16,

    /// Short human description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// SQL sink metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<SqlInfo>,
}

impl SchemaField {
    /// Build a field, rejecting inconsistent SQL metadata
    pub fn new(
        name: impl Into<String>,
        field_type: FieldType,
        position: u16,
        description: Option<String>,
        sql: Option<SqlInfo>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();

        if let Some(sql_info) = &sql {
            let string_typed = matches!(sql_info.sql_type.as_deref(), None | Some("string"));
            if string_typed && (sql_info.scale.is_some() || sql_info.precision.is_some()) {
                return Err(SchemaError::InvalidField {
                    field: name,
                    reason: "string columns cannot have a scale or precision".to_string(),
                });
            }
        }

        Ok(Self {
            name,
            field_type,
            position,
            description,
            sql,
        })
    }

    /// Human readable SQL type of the field, when sink metadata is present
    pub fn full_sql_type(&self) -> Option<String> {
        self.sql.as_ref().and_then(SqlInfo::full_sql_type)
    }
}

/// Decoded wire form, validated into [`SchemaField`]
#[derive(Deserialize)]
struct RawSchemaField {
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    position: u16,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    sql: Option<SqlInfo>,
}

impl TryFrom<RawSchemaField> for SchemaField {
    type Error = SchemaError;

    fn try_from(raw: RawSchemaField) -> Result<Self, Self::Error> {
        SchemaField::new(
            raw.name,
            raw.field_type,
            raw.position,
            raw.description,
            raw.sql,
        )
    }
}
