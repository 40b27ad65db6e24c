//! Changed file detection between two revisions

use git2::{Delta, DiffDelta, DiffOptions, Repository};
use serde::Serialize;
use std::path::Path;

use crate::cancel::Cancellation;
use crate::error::{ChangesError, RefSide, Result, Stage};
use crate::git::revision::tree_from_ref;

pub const DEFAULT_HEAD_REF: &str = "HEAD";
pub const DEFAULT_BASE_REF: &str = "main";

/// How a path differs between the base and head trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    /// Present only in head
    Insert,
    /// Present in both with different content or type
    Modify,
    /// Present only in base
    Delete,
}

impl ChangeAction {
    /// Single-letter status as printed by `git diff --name-status`
    pub fn letter(self) -> char {
        match self {
            ChangeAction::Insert => 'A',
            ChangeAction::Modify => 'M',
            ChangeAction::Delete => 'D',
        }
    }
}

/// One changed path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub action: ChangeAction,
    pub path: String,
}

/// Lists changed files between a head and a base reference
#[derive(Debug, Clone)]
pub struct ChangeLister {
    head_ref: String,
    base_ref: String,
}

impl Default for ChangeLister {
    fn default() -> Self {
        Self {
            head_ref: DEFAULT_HEAD_REF.to_string(),
            base_ref: DEFAULT_BASE_REF.to_string(),
        }
    }
}

impl ChangeLister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(mut self, reference: impl Into<String>) -> Self {
        self.head_ref = reference.into();
        self
    }

    pub fn base(mut self, reference: impl Into<String>) -> Self {
        self.base_ref = reference.into();
        self
    }

    pub fn head_ref(&self) -> &str {
        &self.head_ref
    }

    pub fn base_ref(&self) -> &str {
        &self.base_ref
    }

    /// Open the repository at `path` and classify every path that differs
    /// between the base tree and the head tree, in diff order.
    pub fn list_changes(&self, path: &Path, cancel: &Cancellation) -> Result<Vec<Change>> {
        cancel.check(Stage::Open)?;
        let repo = Repository::open(path).map_err(|source| ChangesError::RepositoryOpen {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened repository");

        self.list_changes_in(&repo, cancel)
    }

    /// Classify the changes in an already opened repository
    pub fn list_changes_in(
        &self,
        repo: &Repository,
        cancel: &Cancellation,
    ) -> Result<Vec<Change>> {
        cancel.check(Stage::ResolveHead)?;
        let head = tree_from_ref(repo, &self.head_ref, RefSide::Head)?;

        cancel.check(Stage::ResolveBase)?;
        let base = tree_from_ref(repo, &self.base_ref, RefSide::Base)?;

        cancel.check(Stage::Diff)?;

        // Rename detection stays off: a move is a delete plus an insert.
        // Typechange keeps a file <-> symlink swap as a single entry.
        let mut diff_opts = DiffOptions::new();
        diff_opts.include_typechange(true);

        let diff = repo
            .diff_tree_to_tree(Some(&base.tree), Some(&head.tree), Some(&mut diff_opts))
            .map_err(ChangesError::DiffComputation)?;
        tracing::debug!(
            head = %head.commit_id,
            base = %base.commit_id,
            deltas = diff.deltas().len(),
            "diffed trees"
        );

        let mut changes = Vec::with_capacity(diff.deltas().len());
        for delta in diff.deltas() {
            cancel.check(Stage::Classify)?;
            let change = classify(&delta)?;
            tracing::trace!(action = ?change.action, path = %change.path, "change");
            changes.push(change);
        }

        Ok(changes)
    }

    /// Same as [`list_changes`](Self::list_changes), paths only
    pub fn list_files(&self, path: &Path, cancel: &Cancellation) -> Result<Vec<String>> {
        let changes = self.list_changes(path, cancel)?;
        Ok(changes.into_iter().map(|c| c.path).collect())
    }
}

/// List the classified changes between `head_ref` and `base_ref`
pub fn list_changes(
    repo_path: &Path,
    head_ref: &str,
    base_ref: &str,
    cancel: &Cancellation,
) -> Result<Vec<Change>> {
    ChangeLister::new()
        .head(head_ref)
        .base(base_ref)
        .list_changes(repo_path, cancel)
}

/// List the paths that differ between `head_ref` and `base_ref`
pub fn list_changed_files(
    repo_path: &Path,
    head_ref: &str,
    base_ref: &str,
    cancel: &Cancellation,
) -> Result<Vec<String>> {
    ChangeLister::new()
        .head(head_ref)
        .base(base_ref)
        .list_files(repo_path, cancel)
}

fn classify(delta: &DiffDelta<'_>) -> Result<Change> {
    let status = delta.status();
    let (action, file) = match status {
        Delta::Added => (ChangeAction::Insert, delta.new_file()),
        Delta::Modified | Delta::Typechange => (ChangeAction::Modify, delta.new_file()),
        Delta::Deleted => (ChangeAction::Delete, delta.old_file()),
        _ => {
            let path = delta
                .new_file()
                .path_bytes()
                .or_else(|| delta.old_file().path_bytes())
                .map(|p| String::from_utf8_lossy(p).into_owned());
            return Err(ChangesError::UnsupportedChangeAction { status, path });
        }
    };

    match file.path_bytes() {
        Some(bytes) if !bytes.is_empty() => Ok(Change {
            action,
            path: String::from_utf8_lossy(bytes).into_owned(),
        }),
        _ => Err(ChangesError::UnsupportedChangeAction { status, path: None }),
    }
}
