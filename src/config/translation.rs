//! Translation configuration (YAML)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

/// Source repository taking part in the translation project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    pub name: String,
    pub platform: String,
    pub owner: String,

    /// Resource configuration file, relative to the translation configuration
    pub config_path: String,

    /// Source language of the repository's resources
    pub language: String,
}

/// Maintainer of the translation project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintainer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProjectSection {
    name: String,
    #[serde(default = "default_platform")]
    platform: String,
    languages: Vec<String>,
    #[serde(default)]
    reviewers: Vec<String>,
    #[serde(default)]
    repositories: Vec<RepositoryEntry>,
}

fn default_platform() -> String {
    "transifex".to_string()
}

/// Parsed translation configuration. Read-only once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(skip)]
    path: PathBuf,
    project: ProjectSection,
    #[serde(default)]
    maintainer: Maintainer,
}

impl TranslationConfig {
    /// Parse translation configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load translation configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(error::config::not_found(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| error::config::read_failed(path.display().to_string(), e.to_string()))?;
        let mut config: Self = serde_yaml::from_str(&content)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))?;
        config.validate()?;
        config.path = path.to_path_buf();
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.project.name.trim().is_empty() {
            return Err(error::config::invalid("project name cannot be empty"));
        }
        if self.project.languages.iter().all(|l| l.trim().is_empty()) {
            return Err(error::config::invalid(
                "at least one target language is required",
            ));
        }
        for (i, repo) in self.project.repositories.iter().enumerate() {
            if repo.name.trim().is_empty() {
                return Err(error::config::invalid(format!(
                    "repository #{i} has an empty name"
                )));
            }
            if self.project.repositories[..i]
                .iter()
                .any(|other| other.name == repo.name)
            {
                return Err(error::config::invalid(format!(
                    "duplicate repository name '{}'",
                    repo.name
                )));
            }
        }
        Ok(())
    }

    /// Path the configuration was loaded from (empty when parsed from a string)
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn project_name(&self) -> &str {
        &self.project.name
    }

    pub fn project_platform(&self) -> &str {
        &self.project.platform
    }

    /// Target language codes, trimmed
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.project
            .languages
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
    }

    pub fn repositories(&self) -> &[RepositoryEntry] {
        &self.project.repositories
    }

    pub fn reviewers(&self) -> &[String] {
        &self.project.reviewers
    }

    #[allow(dead_code)]
    pub fn maintainer(&self) -> &Maintainer {
        &self.maintainer
    }

    /// Location of a repository's resource configuration file
    pub fn resource_config_path(&self, entry: &RepositoryEntry) -> PathBuf {
        let candidate = PathBuf::from(&entry.config_path);
        if candidate.is_absolute() {
            return candidate;
        }
        match self.path.parent() {
            Some(dir) => dir.join(candidate),
            None => candidate,
        }
    }
}
