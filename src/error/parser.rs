use serde::Deserialize;
use regex::Regex;
use super::cloud_error::CloudError;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}

/// Map a non-success Google API response onto a `CloudError`.
///
/// Storage answers with the v1 envelope (`errors[].reason`), Pub/Sub with the
/// v2 one (`status`); both are matched.
pub fn parse_api_error(http_status: u16, body: &str, context: ErrorContext) -> CloudError {
    let envelope: ErrorEnvelope = match serde_json::from_str(body) {
        Ok(env) => env,
        Err(_) => {
            return CloudError::Unknown {
                code: Some(format!("HTTP_{}", http_status)),
                message: non_json_message(body),
                raw_error: body.to_string(),
            };
        }
    };

    let resp = envelope.error;
    let status = if resp.code == 0 { http_status } else { resp.code };
    let message = &resp.message;
    let reason = resp.errors.first().and_then(|e| e.reason.as_deref());
    let api_status = resp.status.as_deref();

    match (status, reason, api_status) {
        (401, _, _) => CloudError::AuthenticationFailed {
            reason: message.clone(),
            help: "The access token was rejected".to_string(),
        },

        (403, Some("quotaExceeded"), _)
        | (403, Some("rateLimitExceeded"), _)
        | (429, _, _)
        | (_, _, Some("RESOURCE_EXHAUSTED")) => {
            let quota_type = extract_quota_type(message).unwrap_or_else(|| "API".to_string());
            CloudError::QuotaExceeded {
                quota_type,
                message: message.clone(),
            }
        }

        (403, _, _) => CloudError::AccessDenied {
            resource: context.resource.unwrap_or_else(|| "resource".to_string()),
            required_permission: extract_required_permission(message),
        },

        (404, _, _) => CloudError::NotFound {
            resource: context.resource.unwrap_or_else(|| message.clone()),
        },

        (500..=599, _, _) => CloudError::Unknown {
            code: Some(format!("HTTP_{}", status)),
            message: format!(
                "{} server error: {}",
                context.operation.as_deref().unwrap_or("API"),
                message
            ),
            raw_error: body.to_string(),
        },

        _ => CloudError::Unknown {
            code: reason.or(api_status).map(|s| s.to_string()),
            message: message.clone(),
            raw_error: body.to_string(),
        },
    }
}

pub fn parse_http_error(error: reqwest::Error, context: ErrorContext) -> CloudError {
    if error.is_connect() || error.is_timeout() {
        let target = context.resource.unwrap_or_else(|| "API endpoint".to_string());
        return CloudError::ConnectionFailed {
            reason: format!("{target}: {error}"),
        };
    }

    if error.is_decode() {
        return CloudError::Unknown {
            code: Some("DECODE".to_string()),
            message: format!("Unexpected response body: {error}"),
            raw_error: format!("{:?}", error),
        };
    }

    CloudError::Unknown {
        code: error.status().map(|s| format!("HTTP_{}", s.as_u16())),
        message: error.to_string(),
        raw_error: format!("{:?}", error),
    }
}

pub fn parse_auth_error(error: yup_oauth2::Error) -> CloudError {
    CloudError::AuthenticationFailed {
        reason: error.to_string(),
        help: "OAuth token exchange for the service account failed".to_string(),
    }
}

fn non_json_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty response body".to_string()
    } else if trimmed.chars().count() > 200 {
        format!("{}...", trimmed.chars().take(200).collect::<String>())
    } else {
        trimmed.to_string()
    }
}

fn extract_required_permission(message: &str) -> Option<String> {
    // "... does not have storage.buckets.list access to the Google Cloud project."
    let perm_re = Regex::new(r"((?:storage|pubsub|cloudsql)\.[a-zA-Z]+\.[a-zA-Z]+)").ok()?;
    perm_re.captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn extract_quota_type(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("rate") {
        Some("rate limit".to_string())
    } else if msg_lower.contains("per minute") || msg_lower.contains("per-minute") {
        Some("requests per minute".to_string())
    } else if msg_lower.contains("daily") {
        Some("daily limit".to_string())
    } else {
        None
    }
}

#[derive(Debug, Default, Clone)]
pub struct ErrorContext {
    pub operation: Option<String>,
    pub resource: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation(mut self, op: impl Into<String>) -> Self {
        self.operation = Some(op.into());
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }
}
