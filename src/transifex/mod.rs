//! Transifex translation repository
//!
//! The sync engine: pushes staged resources to the platform and pulls
//! reviewed translations back into the log directory. Every outcome is
//! reported through return values, log lines and stats records; nothing in
//! here returns an error or retries.

pub mod api;
pub mod content;
pub mod slug;
pub mod stats;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::bundle::{TranslationBundle, build_translations};
use crate::config::TranslationConfig;
use crate::domain::Resource;
use crate::error::Result;
use crate::repository::{TranslationDownload, TranslationRepository};

pub use api::{ApiError, ApiResponse, DEFAULT_BASE_URL, HttpTransifexApi, TransifexApi};
pub use stats::{StatsRecord, StatsSink, StdoutSink};

use stats::{LanguageKey, UploadStats};

/// Account and naming settings of a Transifex organization
#[derive(Debug, Clone, Default)]
pub struct TransifexSettings {
    pub project_slug_prefix: String,
    pub resource_slug_prefix: String,
}

/// Translation repository hosted on Transifex
pub struct TransifexRepository<A = HttpTransifexApi, S = StdoutSink> {
    config: TranslationConfig,
    log_dir: PathBuf,
    settings: TransifexSettings,
    api: A,
    sink: S,
}

impl TransifexRepository {
    /// Repository talking HTTP to `base_url` and writing stats to stdout
    pub fn connect(
        config: TranslationConfig,
        log_dir: impl Into<PathBuf>,
        settings: TransifexSettings,
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        let api = HttpTransifexApi::new(base_url, username, password)?;
        Ok(Self::new(config, log_dir, settings, api, StdoutSink))
    }
}

impl<A: TransifexApi, S: StatsSink> TransifexRepository<A, S> {
    pub fn new(
        config: TranslationConfig,
        log_dir: impl Into<PathBuf>,
        settings: TransifexSettings,
        api: A,
        sink: S,
    ) -> Self {
        Self {
            config,
            log_dir: log_dir.into(),
            settings,
            api,
            sink,
        }
    }

    fn project_slug(&self) -> Result<String> {
        slug::generate_project_slug(
            &self.settings.project_slug_prefix,
            self.config.project_name(),
        )
    }

    fn resource_slug(&self, repository_name: &str, resource_path: &str) -> String {
        slug::generate_resource_slug(
            &self.settings.resource_slug_prefix,
            &[repository_name, resource_path],
        )
    }

    // Keep the uploaded copy around under a name derived from the slug.
    fn mark_processed(&self, staged: &Path, resource_slug: &str) {
        let marker = self.log_dir.join(format!("{resource_slug}_import_failed"));
        if marker.exists() {
            if let Err(e) = fs::remove_file(&marker) {
                warn!("Failed to remove '{}': {}.", marker.display(), e);
            }
        }
        if let Err(e) = fs::rename(staged, &marker) {
            warn!(
                "Failed to rename '{}' to '{}': {}.",
                staged.display(),
                marker.display(),
                e
            );
        }
    }

    fn fetch_translation(
        &self,
        download: &mut TranslationDownload,
        key: &LanguageKey<'_>,
    ) {
        let response = match self.api.get_translation_reviewed(
            key.project_slug,
            key.resource_slug,
            key.language_code,
        ) {
            Ok(r) if r.is_success() => r,
            Ok(r) => {
                error!("Failed to download translation. Status: {}.", r.status_code);
                download.fail("Failed to download translation.");
                return;
            }
            Err(e) => {
                error!("Failed to download translation. Reason: {}.", e);
                download.fail("Failed to download translation.");
                return;
            }
        };

        let file_name = format!("{}_{}", key.resource_slug, key.language_code);
        let raw_path = self.log_dir.join(format!("{file_name}_raw"));
        if let Err(e) = fs::write(&raw_path, &response.text) {
            warn!("Failed to save raw download '{}': {}.", raw_path.display(), e);
        }

        let translation = match content::extract_translation(&response.text) {
            Ok(t) => t,
            Err(e) => {
                download.fail(format!("Failed read raw download. Reason: {e}"));
                return;
            }
        };

        let path = self.log_dir.join(file_name);
        if let Err(e) = fs::write(&path, translation) {
            download.fail(format!(
                "Failed to save translation '{}'. Reason: {}",
                path.display(),
                e
            ));
            return;
        }

        let path = std::path::absolute(&path).unwrap_or(path);
        download.status = format!("Downloaded: {}", path.display());
        download.path = Some(path);
    }
}

impl<A: TransifexApi, S: StatsSink> TranslationRepository for TransifexRepository<A, S> {
    fn config(&self) -> &TranslationConfig {
        &self.config
    }

    fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    fn get_translation_bundle(&self, resource: &Resource) -> TranslationBundle<'_> {
        let translations = build_translations(self.config.languages(), resource);
        debug!(
            "{} translation(s) for '{}'.",
            translations.len(),
            resource.full_path()
        );
        TranslationBundle::new(self, translations, &self.log_dir)
    }

    fn import_resource(&self, resource: &Resource) -> bool {
        let Some(staged) = resource.local_path.as_deref() else {
            error!(
                "BUG: Resource '{}' has no staged local copy.",
                resource.full_path()
            );
            return false;
        };

        let project_slug = match self.project_slug() {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to upload '{}': {}.", resource.full_path(), e);
                return false;
            }
        };
        let resource_slug = self.resource_slug(&resource.repository_name, &resource.resource_path);
        info!(
            "Uploading '{}' to project '{}' as '{}'.",
            resource.full_path(),
            project_slug,
            resource_slug
        );

        let response = match self.api.put_resource(
            &project_slug,
            &resource_slug,
            staged,
            &resource.repository_name,
            &resource.resource_path,
        ) {
            Ok(r) => r,
            Err(e) => {
                error!("Failed to upload '{}': {}.", resource.full_path(), e);
                self.sink.emit(StatsRecord::ResourceUpload(UploadStats::failure(
                    &resource.full_path(),
                    &project_slug,
                    &resource_slug,
                )));
                return false;
            }
        };

        let stats = match UploadStats::from_response(
            &response,
            &resource.full_path(),
            &project_slug,
            &resource_slug,
        ) {
            Ok(stats) => stats,
            Err((stats, reason)) => {
                warn!(
                    "Failed to read upload response of '{}' as json. Reason: {}.",
                    resource.full_path(),
                    reason
                );
                stats
            }
        };
        if !response.is_success() {
            error!(
                "Failed to upload '{}'. Status: {}. Response: '{}'.",
                resource.full_path(),
                response.status_code,
                response.text
            );
        }
        self.sink.emit(StatsRecord::ResourceUpload(stats));

        self.mark_processed(staged, &resource_slug);
        response.is_success()
    }

    fn download_translation(
        &self,
        repository_name: &str,
        resource_path: &str,
        language_code: &str,
    ) -> TranslationDownload {
        let mut download = TranslationDownload::default();
        let resource_slug = self.resource_slug(repository_name, resource_path);

        let project_slug = match self.project_slug() {
            Ok(s) => s,
            Err(e) => {
                error!("{}", e);
                let message = "Failed to generate project slug.";
                let key = LanguageKey {
                    repository_name,
                    resource_path,
                    language_code,
                    project_slug: "",
                    resource_slug: &resource_slug,
                };
                self.sink.emit(key.failure(message));
                download.fail(message);
                return download;
            }
        };
        let key = LanguageKey {
            repository_name,
            resource_path,
            language_code,
            project_slug: &project_slug,
            resource_slug: &resource_slug,
        };

        let stats = match self
            .api
            .get_language_stats(&project_slug, &resource_slug, language_code)
        {
            Ok(r) if r.is_success() => r,
            Ok(r) => {
                let message = format!("Failed to get language stats. Status: {}", r.status_code);
                self.sink.emit(key.failure(&message));
                download.fail(message);
                return download;
            }
            Err(e) => {
                let message = format!("Failed to get language stats. Reason: {e}");
                self.sink.emit(key.failure(&message));
                download.fail(message);
                return download;
            }
        };
        self.sink.emit(key.language_stats(&stats.text));

        if !content::translation_review_completed(&stats.text) {
            download.status = format!(
                "Review not completed: {language_code}, pslug: '{project_slug}', rslug: '{resource_slug}'"
            );
            return download;
        }

        self.fetch_translation(&mut download, &key);
        download
    }

    fn get_stats_project(&self) -> Option<String> {
        let project_slug = match self.project_slug() {
            Ok(s) => s,
            Err(e) => {
                error!("{}", e);
                return None;
            }
        };
        match self.api.get_project_details(&project_slug) {
            Ok(r) if r.is_success() => Some(r.text),
            Ok(r) => {
                error!(
                    "Failed to get project details of '{}'. Status: {}.",
                    project_slug, r.status_code
                );
                None
            }
            Err(e) => {
                error!(
                    "Failed to get project details of '{}'. Reason: {}.",
                    project_slug, e
                );
                None
            }
        }
    }
}
