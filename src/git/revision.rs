//! Revision resolution: reference string -> commit -> tree

use git2::{Oid, Repository, Tree};

use crate::error::{ChangesError, RefSide, Result};

/// A reference resolved down to the tree of its commit
pub struct ResolvedTree<'repo> {
    pub commit_id: Oid,
    pub tree: Tree<'repo>,
}

/// Resolve a commit-ish (branch, tag, hash, `HEAD~1`, ...) to its commit tree.
///
/// Tags are peeled to the commit they point at. A reference that names a
/// non-commit object, or is ambiguous, fails like a missing one.
pub fn tree_from_ref<'repo>(
    repo: &'repo Repository,
    reference: &str,
    side: RefSide,
) -> Result<ResolvedTree<'repo>> {
    let wrap = |source: git2::Error| ChangesError::RevisionResolution {
        side,
        reference: reference.to_string(),
        source,
    };

    let commit = repo
        .revparse_single(reference)
        .and_then(|obj| obj.peel_to_commit())
        .map_err(wrap)?;
    let tree = commit.tree().map_err(wrap)?;

    tracing::debug!(%side, reference, commit = %commit.id(), "resolved reference");

    Ok(ResolvedTree {
        commit_id: commit.id(),
        tree,
    })
}
