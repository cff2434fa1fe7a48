//! Resource bundle

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::domain::Resource;
use crate::repository::ResourceRepository;
use crate::validator::ResourceValidator;

/// Staged copy name for the resource at `index`
pub fn staged_resource_name(index: usize) -> String {
    format!("{index}_local_resource.file")
}

/// Resources of one source repository, prepared lazily one by one.
///
/// The repository is cloned on the first call to `next()`. If that fails
/// the bundle yields nothing at all.
pub struct ResourceBundle<'a> {
    repository: &'a mut dyn ResourceRepository,
    resources: Vec<Resource>,
    log_dir: PathBuf,
    validator: ResourceValidator,
    current: usize,
    prepared: bool,
    exhausted: bool,
}

impl<'a> ResourceBundle<'a> {
    pub fn new(
        repository: &'a mut dyn ResourceRepository,
        resources: Vec<Resource>,
        log_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repository,
            resources,
            log_dir: log_dir.into(),
            validator: ResourceValidator::new(),
            current: 0,
            prepared: false,
            exhausted: false,
        }
    }

    /// Number of declared resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    fn prepare_local_resource(&self, index: usize) -> Option<PathBuf> {
        let resource = &self.resources[index];
        let Some(local_path) = self.repository.resolve_local_path(&resource.resource_path) else {
            error!(
                "BUG: Failed to get local path for resource '{}'.",
                resource.resource_path
            );
            return None;
        };

        if !local_path.is_file() {
            error!(
                "Resource not found in local repo: '{}' ('{}').",
                local_path.display(),
                resource.resource_path
            );
            return None;
        }

        if !self.validator.validate(&local_path, &resource.filetype) {
            return None;
        }

        // Keep a copy of exactly what gets uploaded as evidence of the run.
        let staged = self.log_dir.join(staged_resource_name(index));
        if staged.exists() {
            if let Err(e) = fs::remove_file(&staged) {
                error!("Failed to remove stale copy '{}': {}.", staged.display(), e);
                return None;
            }
        }
        if let Err(e) = fs::copy(&local_path, &staged) {
            error!(
                "Failed to stage resource '{}' to '{}': {}.",
                local_path.display(),
                staged.display(),
                e
            );
            return None;
        }

        debug!("Staged '{}' as '{}'.", resource.resource_path, staged.display());
        Some(staged)
    }
}

impl Iterator for ResourceBundle<'_> {
    type Item = Resource;

    fn next(&mut self) -> Option<Resource> {
        if self.exhausted {
            return None;
        }

        if !self.prepared {
            self.prepared = true;
            if !self.repository.prepare() {
                error!(
                    "Failed to prepare resource repository. {} resource(s) skipped.",
                    self.resources.len()
                );
                self.exhausted = true;
                return None;
            }
        }

        if self.current >= self.resources.len() {
            self.exhausted = true;
            return None;
        }

        let index = self.current;
        let local_path = self.prepare_local_resource(index);
        self.resources[index].local_path = local_path;
        self.current += 1;
        Some(self.resources[index].clone())
    }
}
