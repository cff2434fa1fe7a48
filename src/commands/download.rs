//! Download command implementation

use console::style;
use tracing::error;

use super::helpers;
use crate::cli::DownloadArgs;
use crate::config::ResourceConfiguration;
use crate::error::Result;
use crate::repository::TranslationRepository;

/// Run download command
pub fn run(args: DownloadArgs) -> Result<()> {
    helpers::ensure_dir(&args.run.log_dir)?;
    let tx = helpers::translation_repository(&args.run, &args.transifex)?;

    let mut downloaded = 0;
    let mut pending = 0;
    for entry in tx.config().repositories() {
        let path = tx.config().resource_config_path(entry);
        let resource_config = match ResourceConfiguration::load(&path) {
            Ok(c) => c,
            Err(e) => {
                error!("Skipping repository '{}': {}.", entry.name, e);
                continue;
            }
        };

        for resource in resource_config.resources_for_sync() {
            let bundle = tx.get_translation_bundle(&resource);
            if bundle.is_empty() {
                continue;
            }
            for translation in bundle {
                let Some(status) = &translation.status else {
                    continue;
                };
                if translation.local_path.is_some() {
                    downloaded += 1;
                } else {
                    pending += 1;
                }
                eprintln!("{}: {}", style(&translation).for_stderr().cyan(), status);
            }
        }
    }

    eprintln!(
        "{} {} downloaded, {} not downloaded",
        style("Download finished:").for_stderr().green().bold(),
        downloaded,
        pending
    );
    Ok(())
}
