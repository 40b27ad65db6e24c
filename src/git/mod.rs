//! Git operations module
//!
//! Provides:
//! - Revision resolution down to commit trees
//! - Tree-to-tree change listing

pub mod diff;
pub mod revision;

#[cfg(test)]
pub(crate) mod testing;

pub use diff::{
    list_changed_files, list_changes, Change, ChangeAction, ChangeLister, DEFAULT_BASE_REF,
    DEFAULT_HEAD_REF,
};
pub use revision::{tree_from_ref, ResolvedTree};
