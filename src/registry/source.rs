//! Fetch contract between the cache and the registrar transport

use async_trait::async_trait;

use crate::error::RegistryError;
use crate::schema::Schema;

/// A source of complete schema sets
///
/// The cache only ever asks for the full current set; there is no partial
/// fetch in the contract. Implementations are shared across the background
/// refresh task and foreground callers.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Fetch the full current set of schemas from the registry
    async fn fetch_all(&self) -> Result<Vec<Schema>, RegistryError>;
}
