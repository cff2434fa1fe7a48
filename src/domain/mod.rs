//! Domain models for transync
//!
//! Entities flowing through one synchronization run. Resources and
//! translations are built from configuration, populated by bundles and
//! consumed once per pass.

pub mod pullrequest;
pub mod resource;
pub mod translation;

pub use pullrequest::PullRequestSummary;
pub use resource::{Resource, TranslationSlot};
pub use translation::Translation;
