//! Ref resolution and checkout

use git2::{Commit, Oid, Repository};

use crate::error::{self, Result};

/// Resolve a git ref (branch, tag, or SHA) to a full SHA
///
/// If no ref is provided, defaults to HEAD.
pub fn resolve_ref(repo: &Repository, git_ref: Option<&str>) -> Result<String> {
    let commit = match git_ref {
        Some(r) => resolve_reference(repo, r)?,
        None => repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| error::git::ref_resolve_failed("HEAD", e.message()))?,
    };
    Ok(commit.id().to_string())
}

fn resolve_reference<'a>(repo: &'a Repository, refname: &str) -> Result<Commit<'a>> {
    let candidates = [
        refname.to_string(),
        format!("refs/heads/{refname}"),
        format!("refs/remotes/origin/{refname}"),
        format!("refs/tags/{refname}"),
    ];

    let by_name = candidates.iter().find_map(|candidate| {
        repo.find_reference(candidate)
            .and_then(|reference| reference.peel_to_commit())
            .ok()
    });
    if let Some(commit) = by_name {
        return Ok(commit);
    }

    repo.revparse_single(refname)
        .and_then(|obj| obj.peel_to_commit())
        .map_err(|_| error::git::ref_resolve_failed(refname, "Could not resolve reference"))
}

/// Force-checkout a commit as a detached HEAD
pub fn checkout_commit(repo: &Repository, sha: &str) -> Result<()> {
    let failed = |e: git2::Error| error::git::checkout_failed(sha, e.message());

    let oid = Oid::from_str(sha).map_err(failed)?;
    let commit = repo.find_commit(oid).map_err(failed)?;
    repo.set_head_detached(commit.id()).map_err(failed)?;

    let mut checkout_builder = git2::build::CheckoutBuilder::new();
    checkout_builder.force();
    repo.checkout_head(Some(&mut checkout_builder))
        .map_err(failed)
}
