use std::fmt;

#[derive(Debug, Clone)]
pub enum CloudError {
    AuthenticationFailed {
        reason: String,
        help: String,
    },

    InvalidCredentials {
        path: Option<String>,
        reason: String,
    },

    MissingProject {
        service: String,
    },

    AccessDenied {
        resource: String,
        required_permission: Option<String>,
    },

    NotFound {
        resource: String,
    },

    QuotaExceeded {
        quota_type: String,
        message: String,
    },

    ConnectionFailed {
        reason: String,
    },

    Unknown {
        code: Option<String>,
        message: String,
        raw_error: String,
    },
}

impl CloudError {
    pub fn suggestion(&self) -> String {
        match self {
            CloudError::AuthenticationFailed { .. } => {
                "Try:\n  \
                 • Run: gcloud auth application-default login\n  \
                 • Or set GOOGLE_APPLICATION_CREDENTIALS to your service account key file".to_string()
            }

            CloudError::InvalidCredentials { path, .. } => {
                let path_info = path.as_ref()
                    .map(|p| format!(" ({})", p))
                    .unwrap_or_default();
                format!(
                    "Invalid credentials{path_info}:\n  \
                     • Check GOOGLE_APPLICATION_CREDENTIALS path\n  \
                     • Verify the service account key is valid\n  \
                     • Download a new key from IAM & Admin > Service Accounts"
                )
            }

            CloudError::MissingProject { service } => {
                format!(
                    "No project configured for {service}:\n  \
                     • Set GOOGLE_CLOUD_PROJECT to your project ID\n  \
                     • Run: gcloud projects list"
                )
            }

            CloudError::AccessDenied { resource, required_permission } => {
                let perm = required_permission.as_deref().unwrap_or("the viewer role");
                format!(
                    "Request access to {resource}:\n  \
                     • Required permission: {perm}\n  \
                     • Contact your project admin\n  \
                     • Check the roles granted to the service account"
                )
            }

            CloudError::NotFound { resource } => {
                format!(
                    "Resource not found: {resource}\n  \
                     • Check for typos in the project ID\n  \
                     • Verify the API is enabled: gcloud services list --enabled"
                )
            }

            CloudError::QuotaExceeded { quota_type, .. } => {
                format!(
                    "Quota '{quota_type}' exceeded:\n  \
                     • Wait and retry later\n  \
                     • Request quota increase in Cloud Console"
                )
            }

            CloudError::ConnectionFailed { .. } => {
                "Connection failed:\n  \
                 • Check your internet connection\n  \
                 • Verify the API is enabled for your project\n  \
                 • Try again in a few moments".to_string()
            }

            CloudError::Unknown { .. } => {
                "An unexpected error occurred:\n  \
                 • Check the error message for details\n  \
                 • Check Google Cloud status: https://status.cloud.google.com/".to_string()
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CloudError::AuthenticationFailed { .. } => "AUTH_FAILED",
            CloudError::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            CloudError::MissingProject { .. } => "MISSING_PROJECT",
            CloudError::AccessDenied { .. } => "ACCESS_DENIED",
            CloudError::NotFound { .. } => "NOT_FOUND",
            CloudError::QuotaExceeded { .. } => "QUOTA_EXCEEDED",
            CloudError::ConnectionFailed { .. } => "CONNECTION_FAILED",
            CloudError::Unknown { .. } => "UNKNOWN",
        }
    }
}

impl fmt::Display for CloudError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloudError::AuthenticationFailed { reason, .. } => {
                write!(f, "Authentication failed: {reason}")
            }

            CloudError::InvalidCredentials { reason, path } => {
                write!(f, "Invalid credentials: {reason}")?;
                if let Some(p) = path {
                    write!(f, " (path: {p})")?;
                }
                Ok(())
            }

            CloudError::MissingProject { service } => {
                write!(f, "No project ID available for {service}")
            }

            CloudError::AccessDenied { resource, required_permission } => {
                write!(f, "Access denied to {resource}")?;
                if let Some(perm) = required_permission {
                    write!(f, " (requires {perm})")?;
                }
                Ok(())
            }

            CloudError::NotFound { resource } => {
                write!(f, "Not found: {resource}")
            }

            CloudError::QuotaExceeded { quota_type, message } => {
                write!(f, "Quota exceeded ({quota_type}): {message}")
            }

            CloudError::ConnectionFailed { reason } => {
                write!(f, "Connection failed: {reason}")
            }

            CloudError::Unknown { code, message, .. } => {
                if let Some(c) = code {
                    write!(f, "Cloud API error [{c}]: {message}")
                } else {
                    write!(f, "Cloud API error: {message}")
                }
            }
        }
    }
}

impl std::error::Error for CloudError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CloudError::AuthenticationFailed {
            reason: "test".into(),
            help: "help".into(),
        }.error_code(), "AUTH_FAILED");

        assert_eq!(CloudError::MissingProject {
            service: "Pub/Sub".into(),
        }.error_code(), "MISSING_PROJECT");

        assert_eq!(CloudError::NotFound {
            resource: "projects/demo".into(),
        }.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_access_denied_display() {
        let err = CloudError::AccessDenied {
            resource: "projects/demo".into(),
            required_permission: Some("storage.buckets.list".into()),
        };
        assert_eq!(
            err.to_string(),
            "Access denied to projects/demo (requires storage.buckets.list)"
        );
        assert!(err.suggestion().contains("storage.buckets.list"));
    }

    #[test]
    fn test_invalid_credentials_suggestion_includes_path() {
        let err = CloudError::InvalidCredentials {
            path: Some("/tmp/key.json".into()),
            reason: "bad key".into(),
        };
        assert!(err.to_string().contains("(path: /tmp/key.json)"));
        assert!(err.suggestion().contains("(/tmp/key.json)"));
    }

    #[test]
    fn test_unknown_display_with_code() {
        let err = CloudError::Unknown {
            code: Some("INTERNAL".into()),
            message: "backend error".into(),
            raw_error: String::new(),
        };
        assert_eq!(err.to_string(), "Cloud API error [INTERNAL]: backend error");
    }
}
