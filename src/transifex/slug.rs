//! Project and resource slug derivation
//!
//! Slugs must be stable across runs: uploads and downloads of the same
//! resource have to agree on them.

use sha1::{Digest, Sha1};

use crate::error::{Result, SyncError};

/// Longest project slug the platform accepts
pub const PROJECT_SLUG_MAX_LEN: usize = 50;

/// `<prefix><name>` where `<name>` is the trimmed, lowercased project name
/// with everything outside `[a-z0-9]` replaced by `-`.
pub fn generate_project_slug(prefix: &str, project_name: &str) -> Result<String> {
    let normalized: String = project_name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .collect();

    if normalized.is_empty() {
        return Err(SyncError::SlugFailed {
            reason: "project name is empty".to_string(),
        });
    }

    let slug = format!("{prefix}{normalized}");
    if slug.len() > PROJECT_SLUG_MAX_LEN {
        return Err(SyncError::SlugFailed {
            reason: format!(
                "project slug '{slug}' exceeds {PROJECT_SLUG_MAX_LEN} characters"
            ),
        });
    }
    Ok(slug)
}

/// `<prefix><sha1>` where `<sha1>` is the hex SHA-1 of the concatenated
/// seeds. Existing remote resources are keyed by this value.
pub fn generate_resource_slug(prefix: &str, seeds: &[&str]) -> String {
    let mut hasher = Sha1::new();
    for seed in seeds {
        hasher.update(seed.as_bytes());
    }
    format!("{prefix}{:x}", hasher.finalize())
}
