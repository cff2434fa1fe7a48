//! Translation bundle

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{Resource, Translation};
use crate::repository::TranslationRepository;

/// One translation per target language of `resource`.
///
/// Languages are matched against the resource's declared translations
/// case-insensitively after trimming; languages without a declared path get
/// `translation_path: None` and are skipped when the bundle is iterated.
pub fn build_translations<'l>(
    languages: impl IntoIterator<Item = &'l str>,
    resource: &Resource,
) -> Vec<Translation> {
    languages
        .into_iter()
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(|lang| {
            let translation_path = resource
                .translations
                .iter()
                .find(|slot| slot.language_code.trim().eq_ignore_ascii_case(lang))
                .and_then(|slot| slot.path.clone());
            Translation::new(
                &resource.repository_name,
                &resource.repository_branch,
                &resource.resource_path,
                translation_path,
                lang,
            )
        })
        .collect()
}

/// Translations of one resource, downloaded lazily one by one
pub struct TranslationBundle<'a> {
    repository: &'a dyn TranslationRepository,
    translations: Vec<Translation>,
    log_dir: PathBuf,
    current: usize,
}

impl<'a> TranslationBundle<'a> {
    pub fn new(
        repository: &'a dyn TranslationRepository,
        translations: Vec<Translation>,
        log_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repository,
            translations,
            log_dir: log_dir.into(),
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

impl Iterator for TranslationBundle<'_> {
    type Item = Translation;

    fn next(&mut self) -> Option<Translation> {
        let translation = self.translations.get_mut(self.current)?;
        self.current += 1;

        if translation.translation_path.is_some() {
            let download = self.repository.download_translation(
                &translation.repository_name,
                &translation.resource_path,
                &translation.language_code,
            );
            if !download.succeeded() {
                debug!(
                    "'{}': {} ({} error(s)).",
                    translation.language_code, download.status, download.errors
                );
            }
            translation.local_path = download.path;
            translation.status = Some(download.status);
        } else {
            debug!(
                "'{}': Not listed in resource config. Skipped.",
                translation.language_code
            );
        }

        Some(translation.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::config::TranslationConfig;
    use crate::domain::TranslationSlot;
    use crate::repository::TranslationDownload;

    struct RecordingRepository {
        config: TranslationConfig,
        log_dir: PathBuf,
        downloads: RefCell<Vec<String>>,
    }

    impl RecordingRepository {
        fn new() -> Self {
            let config = TranslationConfig::from_yaml(
                "project:\n  name: Demo\n  languages: [ja, de, FR ]\n",
            )
            .unwrap();
            Self {
                config,
                log_dir: PathBuf::from("/tmp/log"),
                downloads: RefCell::new(Vec::new()),
            }
        }
    }

    impl TranslationRepository for RecordingRepository {
        fn config(&self) -> &TranslationConfig {
            &self.config
        }

        fn log_dir(&self) -> &Path {
            &self.log_dir
        }

        fn get_translation_bundle(&self, resource: &Resource) -> TranslationBundle<'_> {
            TranslationBundle::new(
                self,
                build_translations(self.config.languages(), resource),
                &self.log_dir,
            )
        }

        fn import_resource(&self, _resource: &Resource) -> bool {
            true
        }

        fn download_translation(
            &self,
            _repository_name: &str,
            resource_path: &str,
            language_code: &str,
        ) -> TranslationDownload {
            self.downloads
                .borrow_mut()
                .push(format!("{resource_path}:{language_code}"));
            TranslationDownload {
                path: Some(self.log_dir.join(language_code)),
                status: format!("Downloaded: {language_code}"),
                errors: 0,
            }
        }

        fn get_stats_project(&self) -> Option<String> {
            None
        }
    }

    fn resource() -> Resource {
        Resource::new(
            "demo",
            "main",
            "src/en-US.json",
            "json",
            "en-US",
            vec![
                TranslationSlot::new(" JA ", Some("src/ja.json".to_string())),
                TranslationSlot::new("fr", Some("src/fr.json".to_string())),
                TranslationSlot::new("es", Some("src/es.json".to_string())),
            ],
        )
    }

    #[test]
    fn test_build_translations_cross_product() {
        let translations = build_translations(["ja", " de", "FR "], &resource());
        assert_eq!(translations.len(), 3);
        assert_eq!(translations[0].language_code, "ja");
        assert_eq!(translations[0].translation_path.as_deref(), Some("src/ja.json"));
        assert_eq!(translations[1].language_code, "de");
        assert!(translations[1].translation_path.is_none());
        assert_eq!(translations[2].language_code, "FR");
        assert_eq!(translations[2].translation_path.as_deref(), Some("src/fr.json"));
        assert!(translations.iter().all(|t| t.repository_branch == "main"));
    }

    #[test]
    fn test_missing_path_never_downloads() {
        let repo = RecordingRepository::new();
        let items: Vec<_> = repo.get_translation_bundle(&resource()).collect();

        assert_eq!(items.len(), 3);
        assert_eq!(
            *repo.downloads.borrow(),
            vec!["src/en-US.json:ja".to_string(), "src/en-US.json:FR".to_string()]
        );

        let de = &items[1];
        assert!(de.local_path.is_none());
        assert!(de.status.is_none());

        let ja = &items[0];
        assert_eq!(ja.local_path, Some(PathBuf::from("/tmp/log/ja")));
        assert_eq!(ja.status.as_deref(), Some("Downloaded: ja"));
    }

    #[test]
    fn test_bundle_ends_after_last_item() {
        let repo = RecordingRepository::new();
        let mut bundle = repo.get_translation_bundle(&resource());
        assert_eq!(bundle.len(), 3);
        assert_eq!(bundle.log_dir(), Path::new("/tmp/log"));
        assert!(bundle.by_ref().take(3).count() == 3);
        assert!(bundle.next().is_none());
        assert!(bundle.next().is_none());
        assert_eq!(repo.downloads.borrow().len(), 2);
    }
}
