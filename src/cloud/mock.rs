use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use crate::config::Settings;
use crate::error::CloudError;
use super::{
    require_credentials, require_project,
    Bucket, CloudConnector, PublisherClient, StorageClient, Topic,
};

/// In-memory connector for exercising the probes without network access.
///
/// Client construction follows the same rules as `GcpConnector`: a
/// credentials path is required for both clients and a configured project
/// for the publisher. The storage client falls back to `fallback_project`.
#[derive(Clone, Default)]
pub struct MockConnector {
    buckets: Vec<String>,
    topics: Vec<String>,
    fallback_project: Option<String>,
    storage_connect_error: Option<CloudError>,
    storage_list_error: Option<CloudError>,
    publisher_connect_error: Option<CloudError>,
    publisher_list_error: Option<CloudError>,
    calls: Arc<Mutex<MockCalls>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockCalls {
    pub bucket_limits: Vec<u32>,
    pub topic_paths: Vec<String>,
}

struct MockStorageClient {
    project_id: String,
    buckets: Vec<String>,
    list_error: Option<CloudError>,
    calls: Arc<Mutex<MockCalls>>,
}

struct MockPublisherClient {
    topics: Vec<String>,
    list_error: Option<CloudError>,
    calls: Arc<Mutex<MockCalls>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buckets<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.buckets = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_topics<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fallback_project(mut self, project_id: impl Into<String>) -> Self {
        self.fallback_project = Some(project_id.into());
        self
    }

    pub fn failing_storage_connect(mut self, error: CloudError) -> Self {
        self.storage_connect_error = Some(error);
        self
    }

    pub fn failing_storage_list(mut self, error: CloudError) -> Self {
        self.storage_list_error = Some(error);
        self
    }

    pub fn failing_publisher_connect(mut self, error: CloudError) -> Self {
        self.publisher_connect_error = Some(error);
        self
    }

    pub fn failing_publisher_list(mut self, error: CloudError) -> Self {
        self.publisher_list_error = Some(error);
        self
    }

    pub fn calls(&self) -> MockCalls {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CloudConnector for MockConnector {
    async fn storage_client(&self, settings: &Settings) -> Result<Box<dyn StorageClient>, CloudError> {
        require_credentials(settings)?;
        if let Some(err) = &self.storage_connect_error {
            return Err(err.clone());
        }

        let project_id = settings.project_id.clone()
            .or_else(|| self.fallback_project.clone())
            .ok_or_else(|| CloudError::MissingProject {
                service: "Cloud Storage".to_string(),
            })?;

        Ok(Box::new(MockStorageClient {
            project_id,
            buckets: self.buckets.clone(),
            list_error: self.storage_list_error.clone(),
            calls: Arc::clone(&self.calls),
        }))
    }

    async fn publisher_client(&self, settings: &Settings) -> Result<Box<dyn PublisherClient>, CloudError> {
        require_credentials(settings)?;
        require_project(settings, "Pub/Sub")?;
        if let Some(err) = &self.publisher_connect_error {
            return Err(err.clone());
        }

        Ok(Box::new(MockPublisherClient {
            topics: self.topics.clone(),
            list_error: self.publisher_list_error.clone(),
            calls: Arc::clone(&self.calls),
        }))
    }
}

#[async_trait]
impl StorageClient for MockStorageClient {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    async fn list_buckets(&self, max_results: u32) -> Result<Vec<Bucket>, CloudError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.bucket_limits.push(max_results);
        }
        if let Some(err) = &self.list_error {
            return Err(err.clone());
        }

        Ok(self.buckets
            .iter()
            .take(max_results as usize)
            .map(|name| Bucket { name: name.clone() })
            .collect())
    }
}

#[async_trait]
impl PublisherClient for MockPublisherClient {
    async fn list_topics(&self, project_path: &str) -> Result<Vec<Topic>, CloudError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.topic_paths.push(project_path.to_string());
        }
        if let Some(err) = &self.list_error {
            return Err(err.clone());
        }

        Ok(self.topics
            .iter()
            .map(|name| Topic { name: format!("{}/topics/{}", project_path, name) })
            .collect())
    }
}
