//! Command helper utilities

use std::fs;
use std::path::Path;

use crate::cli::{RunArgs, SourceCredentialArgs, TransifexArgs};
use crate::config::TranslationConfig;
use crate::error::{self, Result};
use crate::git::GitCredentials;
use crate::transifex::{TransifexRepository, TransifexSettings};

/// Create the log directory if it does not exist yet
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|e| error::fs::write_failed(path.display().to_string(), e.to_string()))
}

/// Load the translation configuration and connect to its platform
pub fn translation_repository(run: &RunArgs, args: &TransifexArgs) -> Result<TransifexRepository> {
    let config = TranslationConfig::load(&run.config)?;
    if !config.project_platform().eq_ignore_ascii_case("transifex") {
        return Err(error::config::unknown_platform(config.project_platform()));
    }

    let (Some(username), Some(password)) = (&args.username, &args.password) else {
        return Err(error::config::missing_credentials("transifex"));
    };

    TransifexRepository::connect(
        config,
        &run.log_dir,
        TransifexSettings {
            project_slug_prefix: args.project_slug_prefix.clone(),
            resource_slug_prefix: args.resource_slug_prefix.clone(),
        },
        &args.api_url,
        username,
        password,
    )
}

/// Explicit credentials for a source platform, if both parts are given
pub fn source_credentials(platform: &str, args: &SourceCredentialArgs) -> Option<GitCredentials> {
    let (username, password) = match platform.trim().to_ascii_lowercase().as_str() {
        "github" => (&args.github_username, &args.github_token),
        "bitbucket" => (&args.bitbucket_username, &args.bitbucket_password),
        _ => return None,
    };
    Some(GitCredentials {
        username: username.clone()?,
        password: password.clone()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn credentials() -> SourceCredentialArgs {
        SourceCredentialArgs {
            github_username: Some("octo".to_string()),
            github_token: Some("ghp_token".to_string()),
            bitbucket_username: Some("bucket".to_string()),
            bitbucket_password: None,
        }
    }

    #[test]
    fn test_source_credentials_by_platform() {
        let creds = source_credentials("GitHub", &credentials()).unwrap();
        assert_eq!(creds.username, "octo");
        assert_eq!(creds.password, "ghp_token");
        assert!(source_credentials("bitbucket", &credentials()).is_none());
        assert!(source_credentials("gitlab", &credentials()).is_none());
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("logs/run1");
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
        ensure_dir(&dir).unwrap();
    }

    fn run_args(temp: &TempDir, yaml: &str) -> RunArgs {
        let config = temp.path().join("translation.yaml");
        std::fs::write(&config, yaml).unwrap();
        RunArgs {
            config,
            log_dir: PathBuf::from(temp.path()),
        }
    }

    #[test]
    fn test_translation_repository_requires_credentials() {
        let temp = TempDir::new().unwrap();
        let run = run_args(&temp, "project:\n  name: Demo\n  languages: [ja]\n");
        let result = translation_repository(&run, &TransifexArgs::default());
        assert!(matches!(
            result,
            Err(crate::error::SyncError::MissingCredentials { .. })
        ));
    }

    #[test]
    fn test_translation_repository_rejects_unknown_platform() {
        let temp = TempDir::new().unwrap();
        let run = run_args(
            &temp,
            "project:\n  name: Demo\n  platform: crowdin\n  languages: [ja]\n",
        );
        let result = translation_repository(&run, &TransifexArgs::default());
        assert!(matches!(
            result,
            Err(crate::error::SyncError::UnknownPlatform { .. })
        ));
    }

    #[test]
    fn test_translation_repository_connects() {
        let temp = TempDir::new().unwrap();
        let run = run_args(&temp, "project:\n  name: Demo\n  languages: [ja]\n");
        let args = TransifexArgs {
            username: Some("alice".to_string()),
            password: Some("secret".to_string()),
            api_url: "http://127.0.0.1:9/api/2".to_string(),
            ..TransifexArgs::default()
        };
        assert!(translation_repository(&run, &args).is_ok());
    }
}
