mod gcp;
mod mock;

use std::path::Path;
use async_trait::async_trait;
use serde::Deserialize;
use crate::config::{Settings, CREDENTIALS_VAR};
use crate::error::CloudError;

pub use gcp::{GcpConnector, GcpPublisherClient, GcpStorageClient, PUBSUB_SCOPE, STORAGE_SCOPE};
pub use mock::{MockConnector, MockCalls};

/// Upper bound on buckets requested by the storage probe.
pub const BUCKET_PROBE_LIMIT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Bucket {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Topic {
    pub name: String,
}

#[async_trait]
pub trait StorageClient: Send + Sync {
    fn project_id(&self) -> &str;

    async fn list_buckets(&self, max_results: u32) -> Result<Vec<Bucket>, CloudError>;
}

#[async_trait]
pub trait PublisherClient: Send + Sync {
    fn project_path(&self, project_id: &str) -> String {
        project_path(project_id)
    }

    async fn list_topics(&self, project_path: &str) -> Result<Vec<Topic>, CloudError>;
}

/// Builds cloud clients from the configured credentials.
#[async_trait]
pub trait CloudConnector: Send + Sync {
    async fn storage_client(&self, settings: &Settings) -> Result<Box<dyn StorageClient>, CloudError>;

    async fn publisher_client(&self, settings: &Settings) -> Result<Box<dyn PublisherClient>, CloudError>;
}

pub fn project_path(project_id: &str) -> String {
    format!("projects/{}", project_id)
}

pub(crate) fn require_credentials(settings: &Settings) -> Result<&Path, CloudError> {
    settings.credentials_path.as_deref().ok_or_else(|| CloudError::InvalidCredentials {
        path: None,
        reason: format!("{} is not set", CREDENTIALS_VAR),
    })
}

pub(crate) fn require_project<'a>(settings: &'a Settings, service: &str) -> Result<&'a str, CloudError> {
    settings.project_id.as_deref().ok_or_else(|| CloudError::MissingProject {
        service: service.to_string(),
    })
}
