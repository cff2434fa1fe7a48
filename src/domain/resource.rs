//! Resource domain types

use std::fmt;
use std::path::PathBuf;

/// A declared translation of a resource: language code and its path in the
/// source repository. `path` is `None` when no translation is authored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSlot {
    pub language_code: String,
    pub path: Option<String>,
}

impl TranslationSlot {
    pub fn new(language_code: impl Into<String>, path: Option<String>) -> Self {
        Self {
            language_code: language_code.into(),
            path: path.filter(|p| !p.trim().is_empty()),
        }
    }
}

/// One translatable file in a source repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Owning repository name (e.g. "demo")
    pub repository_name: String,

    /// Branch the resource is read from
    pub repository_branch: String,

    /// Path of the resource within the repository
    pub resource_path: String,

    /// Declared file type, used to pick a validator (e.g. "json")
    pub filetype: String,

    /// Source language code (e.g. "en-US")
    pub language_code: String,

    /// Declared translations of this resource
    pub translations: Vec<TranslationSlot>,

    /// Staged copy of the resource, set by the bundle after validation
    pub local_path: Option<PathBuf>,
}

impl Resource {
    pub fn new(
        repository_name: impl Into<String>,
        repository_branch: impl Into<String>,
        resource_path: impl Into<String>,
        filetype: impl Into<String>,
        language_code: impl Into<String>,
        translations: Vec<TranslationSlot>,
    ) -> Self {
        Self {
            repository_name: repository_name.into(),
            repository_branch: repository_branch.into(),
            resource_path: resource_path.into(),
            filetype: filetype.into(),
            language_code: language_code.into(),
            translations,
            local_path: None,
        }
    }

    /// Whether a validated local copy is ready for upload
    pub fn available(&self) -> bool {
        self.local_path.is_some()
    }

    /// `{repository_name}/{resource_path}`, used in stats records
    pub fn full_path(&self) -> String {
        format!("{}/{}", self.repository_name, self.resource_path)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Resource(repository: '{}', branch: '{}', path: '{}', filetype: '{}', language: '{}', translations: {})",
            self.repository_name,
            self.repository_branch,
            self.resource_path,
            self.filetype,
            self.language_code,
            self.translations.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_slot_path_is_absent() {
        let slot = TranslationSlot::new("ja", Some("  ".to_string()));
        assert!(slot.path.is_none());

        let slot = TranslationSlot::new("ja", Some("src/ja.json".to_string()));
        assert_eq!(slot.path.as_deref(), Some("src/ja.json"));
    }

    #[test]
    fn test_resource_not_available_until_staged() {
        let mut resource = Resource::new("demo", "main", "src/en-US.json", "json", "en-US", vec![]);
        assert!(!resource.available());
        resource.local_path = Some(PathBuf::from("/tmp/0_local_resource.file"));
        assert!(resource.available());
        assert_eq!(resource.full_path(), "demo/src/en-US.json");
    }
}
