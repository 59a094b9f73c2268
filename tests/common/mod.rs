//! Common test utilities and helpers
//!
//! This module provides shared fixtures for integration tests: a schema
//! source with a fetch counter and switchable failure mode, plus canned
//! registrar payloads.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use schemata_client::error::RegistryError;
use schemata_client::registry::SchemaSource;
use schemata_client::schema::{FieldType, Schema, SchemaField, SqlInfo};

/// Schema source that counts fetches and can be switched to fail
///
/// Stands in for the registrar in cache tests, the way a test server hit
/// counter would.
pub struct CountingSource {
    /// Schemas served on a successful fetch
    schemas: Mutex<Vec<Schema>>,
    /// Number of fetch attempts, successful or not
    fetches: AtomicUsize,
    /// When set, every fetch fails with an HTTP 500
    failing: AtomicBool,
}

impl CountingSource {
    /// Create a source serving the given schemas
    pub fn new(schemas: Vec<Schema>) -> Self {
        Self {
            schemas: Mutex::new(schemas),
            fetches: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Number of fetch attempts so far
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Switch the failure mode on or off
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Replace the schemas served on the next successful fetch
    pub fn set_schemas(&self, schemas: Vec<Schema>) {
        *self.schemas.lock().expect("schemas lock") = schemas;
    }

    /// Wait until at least `count` fetches have happened
    pub async fn wait_for_fetches(&self, count: usize) {
        for _ in 0..500 {
            if self.fetches() >= count {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        panic!(
            "timed out waiting for {count} fetches (saw {})",
            self.fetches()
        );
    }
}

#[async_trait]
impl SchemaSource for CountingSource {
    async fn fetch_all(&self) -> Result<Vec<Schema>, RegistryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(RegistryError::Status {
                url: "http://registrar.test/registrar".to_string(),
                status: 500,
            });
        }

        Ok(self.schemas.lock().expect("schemas lock").clone())
    }
}

/// A minimal one-field schema carrying the given name
pub fn sample_schema(name: &str) -> Schema {
    let field = SchemaField::new(
        name.to_string(),
        FieldType::String,
        0,
        None,
        Some(SqlInfo {
            sql_type: Some("string".to_string()),
            ..SqlInfo::default()
        }),
    )
    .expect("sample field must be valid");

    Schema::new(name, vec![field])
}

/// Registrar response body for the given schemas
pub fn registrar_body(schemas: &[Schema]) -> serde_json::Value {
    serde_json::json!({ "types": schemas })
}
