//! Translation domain types

use std::fmt;
use std::path::PathBuf;

/// One expected translated file of a resource for one target language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub repository_name: String,
    pub repository_branch: String,

    /// Path of the resource this translates
    pub resource_path: String,

    /// Declared path of the translation; `None` means not authored yet
    pub translation_path: Option<String>,

    pub language_code: String,

    /// Downloaded translation, set after a successful download
    pub local_path: Option<PathBuf>,

    /// Outcome of the download attempt, if one was made
    pub status: Option<String>,
}

impl Translation {
    pub fn new(
        repository_name: impl Into<String>,
        repository_branch: impl Into<String>,
        resource_path: impl Into<String>,
        translation_path: Option<String>,
        language_code: impl Into<String>,
    ) -> Self {
        Self {
            repository_name: repository_name.into(),
            repository_branch: repository_branch.into(),
            resource_path: resource_path.into(),
            translation_path,
            language_code: language_code.into(),
            local_path: None,
            status: None,
        }
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Translation(repository: '{}', branch: '{}', resource: '{}', path: '{}', language: '{}', local: '{}')",
            self.repository_name,
            self.repository_branch,
            self.resource_path,
            self.translation_path.as_deref().unwrap_or(""),
            self.language_code,
            self.local_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    }
}
