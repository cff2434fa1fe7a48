//! Lazy, single-pass bundles of resources and translations
//!
//! A bundle walks a fixed list of entities in declaration order. Each step
//! does the blocking work for one item (checkout, validation, staging or
//! download) and yields the item with its `local_path` populated, or left
//! empty when that item failed. A failed item never stops the bundle.

pub mod resource;
pub mod translation;

pub use resource::ResourceBundle;
pub use translation::{TranslationBundle, build_translations};
