mod database;

use std::path::PathBuf;

pub use database::{DatabaseSettings, DatabaseUrl, DEFAULT_DB_HOST, DEFAULT_DB_PORT};

pub const PROJECT_VAR: &str = "GOOGLE_CLOUD_PROJECT";
pub const CREDENTIALS_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const DB_HOST_VAR: &str = "DB_HOST";
pub const DB_PORT_VAR: &str = "DB_PORT";
pub const DB_NAME_VAR: &str = "DB_NAME";
pub const DB_USER_VAR: &str = "DB_USER";
pub const DB_PASSWORD_VAR: &str = "DB_PASSWORD";

/// Read-only settings handed to every check.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub project_id: Option<String>,
    pub credentials_path: Option<PathBuf>,
    pub database: DatabaseSettings,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            project_id: non_empty(lookup(PROJECT_VAR)),
            credentials_path: non_empty(lookup(CREDENTIALS_VAR)).map(PathBuf::from),
            database: DatabaseSettings {
                host: non_empty(lookup(DB_HOST_VAR)),
                port: non_empty(lookup(DB_PORT_VAR)),
                name: non_empty(lookup(DB_NAME_VAR)),
                user: non_empty(lookup(DB_USER_VAR)),
                password: non_empty(lookup(DB_PASSWORD_VAR)),
            },
        }
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = non_empty(Some(project_id.into()));
        self
    }

    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.credentials_path = if path.as_os_str().is_empty() { None } else { Some(path) };
        self
    }

    pub fn with_database(mut self, database: DatabaseSettings) -> Self {
        self.database = database;
        self
    }

    /// Value of a required variable as this run sees it.
    pub fn required_value(&self, var: &str) -> Option<String> {
        match var {
            PROJECT_VAR => self.project_id.clone(),
            CREDENTIALS_VAR => self.credentials_path.as_ref().map(|p| p.display().to_string()),
            _ => None,
        }
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_reads_all_fields() {
        let settings = Settings::from_lookup(lookup_from(&[
            (PROJECT_VAR, "demo-project"),
            (CREDENTIALS_VAR, "/keys/sa.json"),
            (DB_HOST_VAR, "db.internal"),
            (DB_PORT_VAR, "6543"),
            (DB_NAME_VAR, "orders"),
            (DB_USER_VAR, "app"),
        ]));

        assert_eq!(settings.project_id.as_deref(), Some("demo-project"));
        assert_eq!(settings.credentials_path, Some(PathBuf::from("/keys/sa.json")));
        assert_eq!(settings.database.host.as_deref(), Some("db.internal"));
        assert_eq!(settings.database.port.as_deref(), Some("6543"));
        assert!(settings.database.password.is_none());
    }

    #[test]
    fn test_empty_values_are_unset() {
        let settings = Settings::from_lookup(lookup_from(&[
            (PROJECT_VAR, ""),
            (CREDENTIALS_VAR, "  "),
        ]));
        assert!(settings.project_id.is_none());
        assert!(settings.credentials_path.is_none());
    }

    #[test]
    fn test_required_value() {
        let settings = Settings::new()
            .with_project_id("demo")
            .with_credentials_path("/keys/sa.json");
        assert_eq!(settings.required_value(PROJECT_VAR), Some("demo".to_string()));
        assert_eq!(settings.required_value(CREDENTIALS_VAR), Some("/keys/sa.json".to_string()));
        assert_eq!(settings.required_value("OTHER"), None);
    }
}
