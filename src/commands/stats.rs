//! Stats command implementation

use super::helpers;
use crate::cli::StatsArgs;
use crate::error::{Result, SyncError};
use crate::repository::TranslationRepository;

/// Print the project details reported by the platform
pub fn run(args: StatsArgs) -> Result<()> {
    let tx = helpers::translation_repository(&args.run, &args.transifex)?;
    match tx.get_stats_project() {
        Some(details) => {
            println!("{details}");
            Ok(())
        }
        None => Err(SyncError::RequestFailed {
            message: format!("no project details for '{}'", tx.config().project_name()),
        }),
    }
}
