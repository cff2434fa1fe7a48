//! Git-backed resource repository

use std::fs;
use std::path::PathBuf;

use tracing::{error, info};

use super::ResourceRepository;
use crate::config::ResourceConfiguration;
use crate::git::{self, GitCredentials};

/// Source repository checked out with git into a local work directory
#[derive(Debug)]
pub struct GitResourceRepository {
    name: String,
    url: String,
    branch: String,
    work_dir: PathBuf,
    credentials: Option<GitCredentials>,
    checkout: Option<PathBuf>,
}

impl GitResourceRepository {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        branch: impl Into<String>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            branch: branch.into(),
            work_dir: work_dir.into(),
            credentials: None,
            checkout: None,
        }
    }

    pub fn from_config(config: &ResourceConfiguration, work_dir: impl Into<PathBuf>) -> Self {
        Self::new(&config.name, &config.url, &config.branch, work_dir)
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Option<GitCredentials>) -> Self {
        self.credentials = credentials;
        self
    }

    fn checkout_dir(&self) -> PathBuf {
        self.work_dir.join(&self.name)
    }
}

impl ResourceRepository for GitResourceRepository {
    fn prepare(&mut self) -> bool {
        let target = self.checkout_dir();
        if target.exists() {
            if let Err(e) = fs::remove_dir_all(&target) {
                error!(
                    "Failed to remove previous checkout '{}': {}.",
                    target.display(),
                    e
                );
                return false;
            }
        }
        if let Err(e) = fs::create_dir_all(&self.work_dir) {
            error!(
                "Failed to create work directory '{}': {}.",
                self.work_dir.display(),
                e
            );
            return false;
        }

        match git::clone_and_checkout(&self.url, &target, &self.branch, self.credentials.as_ref()) {
            Ok(sha) => {
                info!(
                    "Checked out '{}' ({}) at {} into '{}'.",
                    self.name,
                    self.branch,
                    sha,
                    target.display()
                );
                self.checkout = Some(target);
                true
            }
            Err(e) => {
                error!("Failed to prepare repository '{}': {}.", self.name, e);
                false
            }
        }
    }

    fn resolve_local_path(&self, repository_path: &str) -> Option<PathBuf> {
        self.checkout
            .as_ref()
            .map(|root| root.join(repository_path.trim_start_matches('/')))
    }
}
