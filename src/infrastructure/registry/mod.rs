//! npm registry metadata client
//!
//! One request per distinct package name. Lookups are independent: a failure
//! or timeout on one name never blocks or fails the others. A failed lookup
//! yields "no metadata" for that name, which downstream analysis treats as
//! reduced confidence, never as a fatal error.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::task::JoinSet;
use tracing::warn;

use crate::config::RegistryConfig;
use crate::domain::project::RegistryMetadata;

/// Errors raised by registry lookups. Callers of [`MetadataProvider`] never
/// see these; they are absorbed into absent metadata.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("registry HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("package not found: {0}")]
    NotFound(String),
}

/// Source of registry metadata for analysis.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch one package's registry document. `None` when the package cannot
    /// be resolved (private, deleted, network failure).
    async fn fetch(&self, name: &str) -> Option<RegistryMetadata>;

    /// Fetch metadata for many packages; unresolved names are simply absent
    /// from the result.
    async fn fetch_many(&self, names: &[String]) -> HashMap<String, RegistryMetadata> {
        let mut resolved = HashMap::new();
        for name in names {
            if let Some(metadata) = self.fetch(name).await {
                resolved.insert(name.clone(), metadata);
            }
        }
        resolved
    }
}

/// HTTP client for the npm registry.
pub struct NpmRegistryClient {
    client: Client,
    base_url: String,
}

impl NpmRegistryClient {
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("depdrift/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }
}

async fn fetch_document(
    client: &Client,
    base_url: &str,
    name: &str,
) -> Result<RegistryMetadata, RegistryError> {
    let url = format!("{}/{}", base_url, name);
    let response = client.get(&url).send().await?;

    if response.status() == StatusCode::NOT_FOUND {
        return Err(RegistryError::NotFound(name.to_string()));
    }

    let response = response.error_for_status()?;
    Ok(response.json::<RegistryMetadata>().await?)
}

#[async_trait]
impl MetadataProvider for NpmRegistryClient {
    async fn fetch(&self, name: &str) -> Option<RegistryMetadata> {
        match fetch_document(&self.client, &self.base_url, name).await {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                warn!("metadata lookup for {} failed: {}", name, e);
                None
            }
        }
    }

    /// All requests run concurrently; each resolves or fails on its own.
    async fn fetch_many(&self, names: &[String]) -> HashMap<String, RegistryMetadata> {
        let mut join_set = JoinSet::new();
        for name in names {
            let client = self.client.clone();
            let base_url = self.base_url.clone();
            let name = name.clone();
            join_set.spawn(async move {
                let result = fetch_document(&client, &base_url, &name).await;
                (name, result)
            });
        }

        let mut resolved = HashMap::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((name, Ok(metadata))) => {
                    resolved.insert(name, metadata);
                }
                Ok((name, Err(e))) => {
                    warn!("metadata lookup for {} failed: {}", name, e);
                }
                Err(e) => {
                    warn!("metadata fetch task failed: {}", e);
                }
            }
        }
        resolved
    }
}
