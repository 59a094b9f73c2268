//! Registrar client implementation
//!
//! Fetches schema definitions from the registrar HTTP endpoint.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::defaults;
use crate::error::RegistryError;
use crate::registry::source::SchemaSource;
use crate::schema::Schema;

/// Response envelope of the full schema listing
///
/// The `types` key is hardcoded in the registrar.
#[derive(Debug, Deserialize)]
struct SchemaListResponse {
    types: Vec<Schema>,
}

/// HTTP client for the schema registrar
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// HTTP client
    client: reqwest::Client,
    /// Registrar base URL
    base_url: String,
}

impl RegistryClient {
    /// Create a client for the registrar at `host:port`
    pub fn new(host: &str, port: u16) -> Self {
        Self::with_base_url(format!(
            "http://{host}:{port}{}",
            defaults::REGISTRAR_PATH
        ))
    }

    /// Create a client for a registrar at an explicit base URL
    ///
    /// The URL must include the registrar path, e.g.
    /// `http://localhost:8080/registrar`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(defaults::REQUEST_TIMEOUT)
            .connect_timeout(defaults::CONNECT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the registrar base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full current set of schemas
    pub async fn fetch_all(&self) -> Result<Vec<Schema>, RegistryError> {
        let response = self.get(&self.base_url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status {
                url: self.base_url.clone(),
                status: status.as_u16(),
            });
        }

        let listing: SchemaListResponse =
            response.json().await.map_err(|e| RegistryError::Decode {
                url: self.base_url.clone(),
                error: e.to_string(),
            })?;

        Ok(listing.types)
    }

    /// Fetch a single schema by name
    ///
    /// Returns `Ok(None)` when the registrar does not know the name.
    pub async fn fetch_schema(&self, name: &str) -> Result<Option<Schema>, RegistryError> {
        let url = format!("{}/{name}", self.base_url);
        let response = self.get(&url).await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(RegistryError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let schema: Schema = response.json().await.map_err(|e| RegistryError::Decode {
            url,
            error: e.to_string(),
        })?;

        Ok(Some(schema))
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, RegistryError> {
        self.client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| RegistryError::Transport {
                url: url.to_string(),
                error: e.to_string(),
            })
    }
}

#[async_trait]
impl SchemaSource for RegistryClient {
    async fn fetch_all(&self) -> Result<Vec<Schema>, RegistryError> {
        RegistryClient::fetch_all(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_builds_the_registrar_url() {
        let client = RegistryClient::new("127.0.0.1", 8080);
        assert_eq!(client.base_url(), "http://127.0.0.1:8080/registrar");
    }

    #[test]
    fn with_base_url_strips_trailing_slashes() {
        let client = RegistryClient::with_base_url("http://localhost:8080/registrar/");
        assert_eq!(client.base_url(), "http://localhost:8080/registrar");
    }
}
