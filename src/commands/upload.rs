//! Upload command implementation
//!
//! Clones every configured source repository, validates and stages its
//! resources and pushes them to the translation platform.

use std::path::PathBuf;

use console::style;
use tempfile::TempDir;
use tracing::{debug, error, info};

use super::helpers;
use crate::bundle::ResourceBundle;
use crate::cli::UploadArgs;
use crate::config::ResourceConfiguration;
use crate::error::Result;
use crate::repository::{GitResourceRepository, TranslationRepository};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct UploadSummary {
    uploaded: usize,
    failed: usize,
}

/// Run upload command
pub fn run(args: UploadArgs) -> Result<()> {
    helpers::ensure_dir(&args.run.log_dir)?;
    let tx = helpers::translation_repository(&args.run, &args.transifex)?;

    // Checkouts live as long as this guard when no work dir was given.
    let temp_work_dir;
    let work_dir: PathBuf = match &args.work_dir {
        Some(dir) => dir.clone(),
        None => {
            temp_work_dir = TempDir::new()?;
            temp_work_dir.path().to_path_buf()
        }
    };

    info!(
        "Uploading resources of '{}' ({}).",
        tx.config().project_name(),
        tx.config().path().display()
    );

    let mut summary = UploadSummary::default();
    for entry in tx.config().repositories() {
        let path = tx.config().resource_config_path(entry);
        let resource_config = match ResourceConfiguration::load(&path) {
            Ok(c) => c,
            Err(e) => {
                error!("Skipping repository '{}': {}.", entry.name, e);
                continue;
            }
        };
        debug!(
            "Resource configuration '{}' ({}): {}/{} on {}.",
            resource_config.filename,
            resource_config.path.display(),
            resource_config.owner,
            resource_config.name,
            resource_config.platform
        );

        let mut source = GitResourceRepository::from_config(&resource_config, &work_dir)
            .with_credentials(helpers::source_credentials(&entry.platform, &args.source));
        let bundle = ResourceBundle::new(
            &mut source,
            resource_config.resources_for_sync(),
            &args.run.log_dir,
        );
        info!(
            "Repository '{}': {} resource(s), staging into '{}'.",
            resource_config.name,
            bundle.len(),
            bundle.log_dir().display()
        );
        for resource in bundle {
            if resource.available() && tx.import_resource(&resource) {
                summary.uploaded += 1;
            } else {
                summary.failed += 1;
            }
        }

        if let Some(index) = tx.find_target_repository_index(&resource_config.name) {
            let policy = &resource_config.pullrequest;
            debug!(
                "Repository #{index} pull request '{}' reviewers: {:?}.",
                policy.title,
                [tx.reviewers(), policy.reviewers.as_slice()].concat()
            );
        }
    }

    eprintln!(
        "{} {} uploaded, {} failed",
        style("Upload finished:").for_stderr().green().bold(),
        summary.uploaded,
        summary.failed
    );
    Ok(())
}
