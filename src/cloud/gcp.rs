use std::path::Path;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use yup_oauth2::{ServiceAccountAuthenticator, ServiceAccountKey};
use crate::config::Settings;
use crate::error::{parse_api_error, parse_auth_error, parse_http_error, CloudError, ErrorContext};
use super::{
    project_path, require_credentials, require_project,
    Bucket, CloudConnector, PublisherClient, StorageClient, Topic,
};

pub const STORAGE_SCOPE: &str = "https://www.googleapis.com/auth/devstorage.read_only";
pub const PUBSUB_SCOPE: &str = "https://www.googleapis.com/auth/pubsub";

const STORAGE_ENDPOINT: &str = "https://storage.googleapis.com/storage/v1";
const PUBSUB_ENDPOINT: &str = "https://pubsub.googleapis.com/v1";

/// Talks to the Cloud Storage and Pub/Sub JSON APIs with a service account key.
#[derive(Clone)]
pub struct GcpConnector {
    http: reqwest::Client,
    storage_endpoint: String,
    pubsub_endpoint: String,
}

pub struct GcpStorageClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
    project_id: String,
}

pub struct GcpPublisherClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct BucketList {
    #[serde(default)]
    items: Vec<Bucket>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopicList {
    #[serde(default)]
    topics: Vec<Topic>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl GcpConnector {
    pub fn new() -> Self {
        Self::with_endpoints(STORAGE_ENDPOINT, PUBSUB_ENDPOINT)
    }

    pub fn with_endpoints(storage_endpoint: impl Into<String>, pubsub_endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            storage_endpoint: storage_endpoint.into().trim_end_matches('/').to_string(),
            pubsub_endpoint: pubsub_endpoint.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for GcpConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CloudConnector for GcpConnector {
    async fn storage_client(&self, settings: &Settings) -> Result<Box<dyn StorageClient>, CloudError> {
        let key_path = require_credentials(settings)?;
        let key = read_key(key_path).await?;

        let project_id = settings.project_id.clone()
            .or_else(|| key.project_id.clone())
            .ok_or_else(|| CloudError::MissingProject {
                service: "Cloud Storage".to_string(),
            })?;

        let token = access_token(key, STORAGE_SCOPE).await?;
        debug!("Cloud Storage client ready for project {}", project_id);

        Ok(Box::new(GcpStorageClient {
            http: self.http.clone(),
            endpoint: self.storage_endpoint.clone(),
            token,
            project_id,
        }))
    }

    async fn publisher_client(&self, settings: &Settings) -> Result<Box<dyn PublisherClient>, CloudError> {
        let key_path = require_credentials(settings)?;
        require_project(settings, "Pub/Sub")?;
        let key = read_key(key_path).await?;

        let token = access_token(key, PUBSUB_SCOPE).await?;
        debug!("Pub/Sub publisher client ready");

        Ok(Box::new(GcpPublisherClient {
            http: self.http.clone(),
            endpoint: self.pubsub_endpoint.clone(),
            token,
        }))
    }
}

#[async_trait]
impl StorageClient for GcpStorageClient {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    async fn list_buckets(&self, max_results: u32) -> Result<Vec<Bucket>, CloudError> {
        let ctx = ErrorContext::new()
            .with_operation("list_buckets")
            .with_resource(project_path(&self.project_id));

        debug!("Listing up to {} buckets in {}", max_results, self.project_id);

        let response = self.http
            .get(format!("{}/b", self.endpoint))
            .bearer_auth(&self.token)
            .query(&[
                ("project", self.project_id.clone()),
                ("maxResults", max_results.to_string()),
            ])
            .send()
            .await
            .map_err(|e| parse_http_error(e, ctx.clone()))?;

        let list: BucketList = read_json(response, ctx).await?;
        Ok(list.items)
    }
}

#[async_trait]
impl PublisherClient for GcpPublisherClient {
    async fn list_topics(&self, project_path: &str) -> Result<Vec<Topic>, CloudError> {
        let ctx = ErrorContext::new()
            .with_operation("list_topics")
            .with_resource(project_path);

        let url = format!("{}/{}/topics", self.endpoint, project_path);
        let mut topics = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.http.get(&url).bearer_auth(&self.token);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| parse_http_error(e, ctx.clone()))?;

            let page: TopicList = read_json(response, ctx.clone()).await?;
            debug!("Fetched {} topics from {}", page.topics.len(), project_path);
            topics.extend(page.topics);

            match page.next_page_token {
                Some(token) if token.is_empty() => break,
                Some(token) if page_token.as_deref() == Some(token.as_str()) => {
                    warn!("Pub/Sub repeated page token for {}; stopping", project_path);
                    break;
                }
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(topics)
    }
}

async fn read_key(path: &Path) -> Result<ServiceAccountKey, CloudError> {
    yup_oauth2::read_service_account_key(path)
        .await
        .map_err(|e| CloudError::InvalidCredentials {
            path: Some(path.display().to_string()),
            reason: e.to_string(),
        })
}

async fn access_token(key: ServiceAccountKey, scope: &str) -> Result<String, CloudError> {
    let auth = ServiceAccountAuthenticator::builder(key)
        .build()
        .await
        .map_err(|e| CloudError::InvalidCredentials {
            path: None,
            reason: e.to_string(),
        })?;

    let token = auth.token(&[scope]).await.map_err(parse_auth_error)?;

    token.token()
        .map(|t| t.to_string())
        .ok_or_else(|| CloudError::AuthenticationFailed {
            reason: "Token response did not contain an access token".to_string(),
            help: "Check that the service account key is active".to_string(),
        })
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response, ctx: ErrorContext) -> Result<T, CloudError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(parse_api_error(status.as_u16(), &body, ctx));
    }

    response.json::<T>().await.map_err(|e| parse_http_error(e, ctx))
}
