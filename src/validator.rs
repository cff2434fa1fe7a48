//! Resource validation
//!
//! Checks that a fetched resource is well-formed for its declared file type
//! before it is staged for upload. File types without a registered check
//! are accepted as-is.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{error, info};

/// Validates resource files by declared file type
#[derive(Debug, Default, Clone, Copy)]
pub struct ResourceValidator;

impl ResourceValidator {
    pub fn new() -> Self {
        Self
    }

    /// Returns `true` if the resource at `path` is usable as `filetype`
    pub fn validate(&self, path: &Path, filetype: &str) -> bool {
        match filetype.trim().to_ascii_lowercase().as_str() {
            "json" => validate_json(path),
            other => {
                info!("No resource validator for '{}'.", other);
                true
            }
        }
    }
}

fn validate_json(path: &Path) -> bool {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            error!("Failed to validate: {}. Reason: {}.", path.display(), e);
            return false;
        }
    };

    match serde_json::from_reader::<_, serde_json::Value>(BufReader::new(file)) {
        Ok(_) => true,
        Err(e) => {
            error!("Failed to validate: {}. Reason: {}.", path.display(), e);
            false
        }
    }
}
