//! Resource configuration (JSON)
//!
//! ```json
//! {
//!     "repository": {
//!         "platform": "github",
//!         "url": "https://github.com/acme/demo.git",
//!         "owner": "acme",
//!         "name": "demo",
//!         "branch": "main",
//!         "resources": [
//!             {"resource": {"path": "src/en-US.json", "filetype": "json",
//!                           "language_code": "en-US",
//!                           "translations": [{"ja": "src/ja.json"}]}}
//!         ],
//!         "pullrequest": {"title": "Translation Updates", "reviewers": ["bob"]},
//!         "options": [{"name": "value"}]
//!     }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{Resource, TranslationSlot};
use crate::error::{self, Result};

#[derive(Deserialize)]
struct ResourceConfigFile {
    repository: RepositorySection,
}

#[derive(Deserialize)]
struct RepositorySection {
    platform: String,
    url: String,
    owner: String,
    name: String,
    branch: String,
    resources: Vec<ResourceEntry>,
    pullrequest: PullRequestSection,
    #[serde(default)]
    options: Option<Vec<BTreeMap<String, serde_json::Value>>>,
}

#[derive(Deserialize)]
struct ResourceEntry {
    resource: ResourceSection,
}

#[derive(Deserialize)]
struct ResourceSection {
    path: String,
    filetype: String,
    language_code: String,
    #[serde(default)]
    translations: Vec<BTreeMap<String, Option<String>>>,
}

#[derive(Deserialize)]
struct PullRequestSection {
    title: String,
    #[serde(default)]
    reviewers: Option<Vec<String>>,
}

/// Resource declared in a resource configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDeclaration {
    pub path: String,
    pub filetype: String,
    pub language_code: String,
    pub translations: Vec<TranslationSlot>,
}

/// Pull request policy of a source repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestPolicy {
    pub title: String,
    pub reviewers: Vec<String>,
}

/// Opaque name/value option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOption {
    pub name: String,
    pub value: String,
}

/// Sync policy of one source repository. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConfiguration {
    /// File name of the configuration
    pub filename: String,
    /// Full path of the configuration
    pub path: PathBuf,
    pub platform: String,
    pub url: String,
    pub owner: String,
    pub name: String,
    pub branch: String,
    pub resources: Vec<ResourceDeclaration>,
    pub pullrequest: PullRequestPolicy,
    pub options: Vec<ConfigOption>,
}

impl ResourceConfiguration {
    /// Load a resource configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(error::config::not_found(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| error::config::read_failed(path.display().to_string(), e.to_string()))?;
        Self::from_json(&content, path)
    }

    /// Parse a resource configuration; `path` is recorded as its origin
    pub fn from_json(json: &str, path: &Path) -> Result<Self> {
        let file: ResourceConfigFile = serde_json::from_str(json)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))?;
        let repo = file.repository;

        let resources = repo
            .resources
            .into_iter()
            .map(|entry| ResourceDeclaration {
                path: entry.resource.path,
                filetype: entry.resource.filetype,
                language_code: entry.resource.language_code,
                translations: entry
                    .resource
                    .translations
                    .into_iter()
                    .flat_map(BTreeMap::into_iter)
                    .map(|(lang, p)| TranslationSlot::new(lang, p))
                    .collect(),
            })
            .collect();

        let options = repo
            .options
            .unwrap_or_default()
            .into_iter()
            .flat_map(BTreeMap::into_iter)
            .map(|(name, value)| ConfigOption {
                name,
                value: match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                },
            })
            .collect();

        Ok(Self {
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            platform: repo.platform,
            url: repo.url,
            owner: repo.owner,
            name: repo.name,
            branch: repo.branch,
            resources,
            pullrequest: PullRequestPolicy {
                title: repo.pullrequest.title,
                reviewers: repo.pullrequest.reviewers.unwrap_or_default(),
            },
            options,
        })
    }

    /// Look up an option value by name
    #[allow(dead_code)]
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.value.as_str())
    }

    /// Build the resources of this repository for one sync pass
    pub fn resources_for_sync(&self) -> Vec<Resource> {
        self.resources
            .iter()
            .map(|r| {
                Resource::new(
                    &self.name,
                    &self.branch,
                    &r.path,
                    &r.filetype,
                    &r.language_code,
                    r.translations.clone(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "repository": {
            "platform": "github",
            "url": "https://github.com/acme/demo.git",
            "owner": "acme",
            "name": "demo",
            "branch": "main",
            "resources": [
                {"resource": {"path": "src/en-US.json", "filetype": "json",
                              "language_code": "en-US",
                              "translations": [{"ja": "src/ja.json"}, {"de": null}]}},
                {"resource": {"path": "src/other.properties", "filetype": "properties",
                              "language_code": "en-US", "translations": []}}
            ],
            "pullrequest": {"title": "Translation Updates", "reviewers": null},
            "options": [{"auto_merge": false}, {"label": "l10n"}]
        }
    }"#;

    #[test]
    fn test_parse_resource_configuration() {
        let config = ResourceConfiguration::from_json(SAMPLE, Path::new("/cfg/demo.json")).unwrap();
        assert_eq!(config.filename, "demo.json");
        assert_eq!(config.name, "demo");
        assert_eq!(config.branch, "main");
        assert_eq!(config.resources.len(), 2);
        assert_eq!(
            config.resources[0].translations,
            vec![
                TranslationSlot::new("ja", Some("src/ja.json".to_string())),
                TranslationSlot::new("de", None),
            ]
        );
        assert!(config.pullrequest.reviewers.is_empty());
        assert_eq!(config.option("auto_merge"), Some("false"));
        assert_eq!(config.option("label"), Some("l10n"));
        assert_eq!(config.option("missing"), None);
    }

    #[test]
    fn test_resources_for_sync() {
        let config = ResourceConfiguration::from_json(SAMPLE, Path::new("demo.json")).unwrap();
        let resources = config.resources_for_sync();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].repository_name, "demo");
        assert_eq!(resources[0].repository_branch, "main");
        assert_eq!(resources[1].filetype, "properties");
        assert!(resources.iter().all(|r| r.local_path.is_none()));
    }

    #[test]
    fn test_missing_key_is_parse_error() {
        let json = r#"{"repository": {"platform": "github"}}"#;
        let result = ResourceConfiguration::from_json(json, Path::new("bad.json"));
        assert!(matches!(
            result,
            Err(crate::error::SyncError::ConfigParseFailed { .. })
        ));
    }
}
