//! Error types for the schemata client
//!
//! Domain-specific error types using thiserror.

use thiserror::Error;

/// Registry fetch errors
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Network error reaching the registrar
    #[error("Network error fetching '{url}': {error}")]
    Transport { url: String, error: String },

    /// Registrar answered with a non-success status
    #[error("Registrar at '{url}' answered HTTP {status}")]
    Status { url: String, status: u16 },

    /// Response body could not be decoded
    #[error("Malformed registrar response from '{url}': {error}")]
    Decode { url: String, error: String },
}

/// Schema data-model errors
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Field type string not known to the registry
    #[error("Unknown field type '{value}'")]
    UnknownFieldType { value: String },

    /// Field definition rejected by validation
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}
