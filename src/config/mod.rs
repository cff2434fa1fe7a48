//! Configuration file handling for transync
//!
//! This module contains data structures for:
//! - the translation configuration (YAML): project, target languages and
//!   the source repositories taking part in the sync
//! - resource configurations (JSON): one per source repository, declaring
//!   its translatable resources and pull request policy

pub mod resource;
pub mod translation;

pub use resource::{ConfigOption, PullRequestPolicy, ResourceConfiguration, ResourceDeclaration};
pub use translation::{Maintainer, RepositoryEntry, TranslationConfig};
