//! Command implementations for the transync CLI

pub mod completions;
pub mod download;
mod helpers;
pub mod pull_requests;
pub mod stats;
pub mod upload;
pub mod version;
