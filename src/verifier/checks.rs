use tracing::debug;
use crate::cloud::{CloudConnector, BUCKET_PROBE_LIMIT};
use crate::config::{Settings, CREDENTIALS_VAR, PROJECT_VAR};
use crate::credentials::CredentialsDocument;
use crate::error::{CloudError, CredCheckError};
use super::result::CheckResult;

pub const ENVIRONMENT_CHECK: &str = "Environment variables";
pub const CREDENTIALS_CHECK: &str = "Credentials file";
pub const STORAGE_CHECK: &str = "Cloud Storage connection";
pub const MESSAGING_CHECK: &str = "Pub/Sub connection";
pub const DATABASE_CHECK: &str = "Database configuration";

pub const REQUIRED_VARS: [&str; 2] = [PROJECT_VAR, CREDENTIALS_VAR];

pub fn check_environment_variables(settings: &Settings) -> CheckResult {
    let mut result = CheckResult::new(ENVIRONMENT_CHECK);

    for var in REQUIRED_VARS {
        let Some(value) = settings.required_value(var) else {
            result.fail_with(&CredCheckError::MissingVariable(var.to_string()));
            continue;
        };

        if var == CREDENTIALS_VAR {
            let exists = settings.credentials_path.as_deref().is_some_and(|p| p.exists());
            if !exists {
                result.fail_with(&CredCheckError::InvalidPath {
                    variable: var.to_string(),
                    path: value,
                });
                continue;
            }
        }

        result.ok(format!("{}: {}", var, value));
    }

    result
}

pub fn check_credentials_file(settings: &Settings) -> CheckResult {
    let mut result = CheckResult::new(CREDENTIALS_CHECK);

    let Some(path) = settings.credentials_path.as_deref() else {
        result.fail_with(&CredCheckError::MissingVariable(CREDENTIALS_VAR.to_string()));
        return result;
    };

    debug!("Reading credentials from {}", path.display());

    match CredentialsDocument::load(path) {
        Ok(doc) => {
            result.ok("Credentials file is valid");
            result.info(format!("Type: {}", doc.display_field("type")));
            result.info(format!("Project: {}", doc.display_field("project_id")));
            result.info(format!("Email: {}", doc.display_field("client_email")));
        }
        Err(e) => result.fail_with(&e),
    }

    result
}

pub async fn check_object_storage_connection(
    settings: &Settings,
    connector: &dyn CloudConnector,
) -> CheckResult {
    let mut result = CheckResult::new(STORAGE_CHECK);

    let client = match connector.storage_client(settings).await {
        Ok(client) => client,
        Err(e) => {
            fail_cloud(&mut result, "Error creating Cloud Storage client", &e);
            return result;
        }
    };

    result.ok("Cloud Storage client created");
    result.info(format!("Project: {}", client.project_id()));

    match client.list_buckets(BUCKET_PROBE_LIMIT).await {
        Ok(buckets) => {
            debug!("Storage probe returned {} buckets", buckets.len());
            result.ok(format!("Bucket access verified ({} buckets found)", buckets.len()));
        }
        Err(e) => fail_cloud(&mut result, "Error listing buckets", &e),
    }

    result
}

pub async fn check_messaging_connection(
    settings: &Settings,
    connector: &dyn CloudConnector,
) -> CheckResult {
    let mut result = CheckResult::new(MESSAGING_CHECK);

    let publisher = match connector.publisher_client(settings).await {
        Ok(publisher) => publisher,
        Err(e) => {
            fail_cloud(&mut result, "Error creating Pub/Sub publisher", &e);
            return result;
        }
    };

    let Some(project_id) = settings.project_id.as_deref() else {
        result.fail_with(&CredCheckError::MissingVariable(PROJECT_VAR.to_string()));
        return result;
    };
    let project_path = publisher.project_path(project_id);

    match publisher.list_topics(&project_path).await {
        Ok(topics) => {
            result.ok(format!("Pub/Sub access verified ({} topics found)", topics.len()));
        }
        Err(e) => fail_cloud(&mut result, "Error listing Pub/Sub topics", &e),
    }

    result
}

/// Builds the database URL only; never opens a connection.
pub fn check_database_configuration(settings: &Settings) -> CheckResult {
    let mut result = CheckResult::new(DATABASE_CHECK);

    match settings.database.database_url() {
        Ok(url) => {
            result.ok("Database URL built successfully");
            result.info(format!("Host: {}", url.host));
            result.info(format!("Port: {}", url.port));
            result.info(format!("Database: {}", url.name));
        }
        Err(e) => result.fail_with(&e),
    }

    result
}

fn fail_cloud(result: &mut CheckResult, context: &str, err: &CloudError) {
    let code = err.error_code();
    let suggestion = err.suggestion();
    let err = CredCheckError::from(err.clone());
    result.fail(err.kind(), format!("{} [{}]: {}", context, code, err));
    for line in suggestion.lines() {
        result.warn(line.trim_start().to_string());
    }
}
