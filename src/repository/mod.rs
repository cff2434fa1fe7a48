//! Repository abstraction
//!
//! Capability interfaces a source-repository plugin and a
//! translation-platform plugin implement. Bundles are the clients of these
//! traits and never depend on a concrete platform.

pub mod git;

use std::path::{Path, PathBuf};

use crate::bundle::TranslationBundle;
use crate::config::TranslationConfig;
use crate::domain::Resource;

pub use git::GitResourceRepository;

/// Source repository holding original-language resource files
pub trait ResourceRepository {
    /// Clone and check out the repository. Called at most once per run.
    fn prepare(&mut self) -> bool;

    /// Local filesystem path of a repository-relative path, `None` if the
    /// repository cannot resolve it (e.g. it was never prepared)
    fn resolve_local_path(&self, repository_path: &str) -> Option<PathBuf>;
}

/// Outcome of downloading one translation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationDownload {
    /// Absolute path of the extracted translation, when downloaded
    pub path: Option<PathBuf>,
    /// Human readable status, e.g. "Review not completed: ..."
    pub status: String,
    pub errors: u32,
}

impl TranslationDownload {
    pub fn succeeded(&self) -> bool {
        self.errors == 0 && self.path.is_some()
    }

    pub(crate) fn fail(&mut self, status: impl Into<String>) {
        self.errors += 1;
        self.status = status.into();
    }
}

/// Translation management platform holding translated counterparts
pub trait TranslationRepository {
    /// Translation configuration the repository was built with
    fn config(&self) -> &TranslationConfig;

    /// Log/staging directory of the run
    fn log_dir(&self) -> &Path;

    /// Bundle over every configured target language of `resource`
    fn get_translation_bundle(&self, resource: &Resource) -> TranslationBundle<'_>;

    /// Push one validated, staged resource to the platform
    fn import_resource(&self, resource: &Resource) -> bool;

    /// Poll review status and download the reviewed translation of a resource
    fn download_translation(
        &self,
        repository_name: &str,
        resource_path: &str,
        language_code: &str,
    ) -> TranslationDownload;

    /// Aggregate project status as reported by the platform
    fn get_stats_project(&self) -> Option<String>;

    fn reviewers(&self) -> &[String] {
        self.config().reviewers()
    }

    /// Index of the configured source repository called `name`
    fn find_target_repository_index(&self, name: &str) -> Option<usize> {
        self.config()
            .repositories()
            .iter()
            .position(|r| r.name == name)
    }
}
