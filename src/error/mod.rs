mod cloud_error;
mod parser;

use thiserror::Error;

use crate::verifier::FailureKind;

pub use cloud_error::CloudError;
pub use parser::{parse_api_error, parse_auth_error, parse_http_error, ErrorContext};

#[derive(Error, Debug)]
pub enum CredCheckError {
    #[error("Cloud error: {0}")]
    Cloud(#[from] CloudError),

    #[error("{0} is not set")]
    MissingVariable(String),

    #[error("{variable} points to a file that does not exist: {path}")]
    InvalidPath {
        variable: String,
        path: String,
    },

    #[error("Credentials file does not exist: {0}")]
    CredentialsNotFound(String),

    #[error("File {path} is not valid JSON: {reason}")]
    InvalidJson {
        path: String,
        reason: String,
    },

    #[error("Missing keys in credentials file: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    #[error("Database configuration error: {0}")]
    DatabaseConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CredCheckError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CredCheckError::MissingVariable(_) => FailureKind::MissingConfiguration,
            CredCheckError::InvalidPath { .. }
            | CredCheckError::CredentialsNotFound(_)
            | CredCheckError::Io(_) => FailureKind::MissingResource,
            CredCheckError::InvalidJson { .. }
            | CredCheckError::MissingKeys(_)
            | CredCheckError::Json(_) => FailureKind::MalformedInput,
            CredCheckError::Cloud(_) => FailureKind::RemoteCallFailure,
            CredCheckError::DatabaseConfig(_) => FailureKind::LocalConstructionFailure,
        }
    }
}

pub type Result<T> = std::result::Result<T, CredCheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_display() {
        let err = CredCheckError::MissingKeys(vec!["private_key".into(), "client_email".into()]);
        assert_eq!(err.to_string(), "Missing keys in credentials file: private_key, client_email");
        assert_eq!(err.kind(), FailureKind::MalformedInput);
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            CredCheckError::MissingVariable("GOOGLE_CLOUD_PROJECT".into()).kind(),
            FailureKind::MissingConfiguration
        );
        assert_eq!(
            CredCheckError::CredentialsNotFound("/nope.json".into()).kind(),
            FailureKind::MissingResource
        );
        assert_eq!(
            CredCheckError::DatabaseConfig("DB_NAME is not set".into()).kind(),
            FailureKind::LocalConstructionFailure
        );
        let cloud = CloudError::ConnectionFailed { reason: "offline".into() };
        assert_eq!(CredCheckError::from(cloud).kind(), FailureKind::RemoteCallFailure);
    }
}
