//! Repository cloning

use std::path::Path;

use git2::{FetchOptions, RemoteCallbacks, Repository, build::RepoBuilder};

use super::auth::{GitCredentials, setup_auth_callbacks};
use super::error::interpret_git_error;
use super::url::{is_local_url, normalize_file_url_for_clone, normalize_ssh_url_for_clone};
use crate::error::{self, Result};

/// Clone a git repository to a target directory
///
/// # Arguments
/// * `url` - The git URL (HTTPS, SSH, file:// or a local path)
/// * `target` - The target directory path; must not exist or be empty
/// * `branch` - Branch to check out instead of the remote HEAD
/// * `shallow` - Fetch only the tip commit (ignored for local URLs)
/// * `credentials` - Explicit credentials for HTTPS remotes
pub fn clone(
    url: &str,
    target: &Path,
    branch: Option<&str>,
    shallow: bool,
    credentials: Option<&GitCredentials>,
) -> Result<Repository> {
    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks, credentials.cloned());

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);
    if shallow && !is_local_url(url) {
        fetch_options.depth(1);
    }

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);
    if let Some(branch) = branch {
        builder.branch(branch);
    }

    let url_to_clone = normalize_ssh_url_for_clone(url);
    let url_to_clone = normalize_file_url_for_clone(&url_to_clone);
    builder
        .clone(url_to_clone.as_ref(), target)
        .map_err(|e| error::git::clone_failed(url, interpret_git_error(&e)))
}
