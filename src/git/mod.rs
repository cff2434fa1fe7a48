//! Git operations for source repositories
//!
//! This module handles:
//! - Cloning repositories (HTTPS, SSH and local paths) at a branch
//! - Resolving the branch to an exact commit and checking it out
//! - Authentication via git's native credential system, optionally
//!   preceded by explicit platform credentials

mod auth;
mod checkout;
mod clone;
mod error;
mod url;

use std::path::Path;

pub use auth::GitCredentials;
pub use checkout::{checkout_commit, resolve_ref};
pub use clone::clone;

use crate::error::Result;

/// Clone `url` into `target` and check out the tip of `branch`.
///
/// Returns the SHA that was checked out.
pub fn clone_and_checkout(
    url: &str,
    target: &Path,
    branch: &str,
    credentials: Option<&GitCredentials>,
) -> Result<String> {
    let repo = clone(url, target, Some(branch), true, credentials)?;
    let sha = resolve_ref(&repo, Some(branch))?;
    checkout_commit(&repo, &sha)?;
    Ok(sha)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use git2::{Repository, Signature};

    /// Initialise a repository at `path` with one commit holding `files` on `branch`
    pub fn init_repo_with_files(path: &Path, branch: &str, files: &[(&str, &str)]) -> String {
        let repo = Repository::init(path).unwrap();
        for (name, content) in files {
            let full = path.join(name);
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(full, content).unwrap();
        }

        let mut index = repo.index().unwrap();
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let commit_id = repo
            .commit(None, &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();
        let commit = repo.find_commit(commit_id).unwrap();
        repo.branch(branch, &commit, true).unwrap();
        repo.set_head(&format!("refs/heads/{branch}")).unwrap();
        commit_id.to_string()
    }
}
