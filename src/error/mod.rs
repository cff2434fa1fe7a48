//! Error types and handling for transync
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration errors
//! - [`git`]: Git operation errors
//! - [`fs`]: File system errors
//!
//! These errors are raised at the plumbing boundaries (configuration loading,
//! repository preparation, CLI commands). The synchronization core reports
//! per-item outcomes through return values instead.

pub mod config;
pub mod fs;
pub mod git;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for transync operations
#[derive(Error, Diagnostic, Debug)]
pub enum SyncError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(transync::config::not_found),
        help("Pass the translation configuration with --config")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(transync::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(transync::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(transync::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Unknown platform: {platform}")]
    #[diagnostic(
        code(transync::config::unknown_platform),
        help("Supported platforms: transifex (translation), github and bitbucket (source)")
    )]
    UnknownPlatform { platform: String },

    #[error("Missing credentials for {platform}")]
    #[diagnostic(
        code(transync::config::missing_credentials),
        help("Set the credentials with command line options or environment variables")
    )]
    MissingCredentials { platform: String },

    // Git errors
    #[error("Failed to clone repository: {url}: {reason}")]
    #[diagnostic(
        code(transync::git::clone_failed),
        help("Check that URL is correct and you have access to repository")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Failed to resolve git ref '{git_ref}': {reason}")]
    #[diagnostic(code(transync::git::ref_resolve_failed))]
    GitRefResolveFailed { git_ref: String, reason: String },

    #[error("Failed to checkout commit '{sha}': {reason}")]
    #[diagnostic(code(transync::git::checkout_failed))]
    GitCheckoutFailed { sha: String, reason: String },

    #[error("Git operation failed: {message}")]
    #[diagnostic(code(transync::git::operation_failed))]
    GitOperationFailed { message: String },

    // Translation platform errors
    #[error("Failed to generate slug: {reason}")]
    #[diagnostic(code(transync::platform::slug_failed))]
    SlugFailed { reason: String },

    #[error("HTTP client error: {message}")]
    #[diagnostic(code(transync::platform::http_client))]
    HttpClient { message: String },

    #[error("Platform request failed: {message}")]
    #[diagnostic(code(transync::platform::request_failed))]
    RequestFailed { message: String },

    // File system errors
    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(transync::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(transync::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for SyncError {
    fn from(err: serde_yaml::Error) -> Self {
        SyncError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for SyncError {
    fn from(err: git2::Error) -> Self {
        SyncError::GitOperationFailed {
            message: err.message().to_string(),
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::RequestFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_display() {
        let err = config::not_found("translation.yaml");
        assert_eq!(
            err.to_string(),
            "Configuration file not found: translation.yaml"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SyncError = io.into();
        assert!(matches!(err, SyncError::IoError { .. }));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{ not: [a list").unwrap_err();
        let err: SyncError = yaml_err.into();
        assert!(matches!(err, SyncError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_diagnostic_code() {
        let err = git::clone_failed("https://example.com/repo.git", "Repository not found");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("transync::git::clone_failed"));
    }
}
