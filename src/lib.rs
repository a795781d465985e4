pub mod error;
pub mod config;
pub mod credentials;
pub mod cloud;
pub mod verifier;

pub use error::{CloudError, CredCheckError, Result};
pub use config::{DatabaseSettings, DatabaseUrl, Settings};
pub use credentials::CredentialsDocument;
pub use cloud::{CloudConnector, GcpConnector, MockConnector, PublisherClient, StorageClient};
pub use verifier::{Check, CheckOutcome, CheckResult, FailureKind, ReportOptions, VerificationReport, Verifier};
