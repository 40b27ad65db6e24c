//! git-files-changed - list the files that differ between two git revisions
//!
//! Built for CI in monorepos, where checks should only run on what a change
//! touched:
//! - Resolve a head and a base reference to commit trees
//! - Diff the trees and classify each path as inserted, modified or deleted
//! - Filter the result with include/exclude globs
//! - Render it as plain text or JSON

pub mod cancel;
pub mod config;
pub mod error;
pub mod filter;
pub mod git;
pub mod output;

pub use cancel::Cancellation;
pub use config::Config;
pub use error::{ChangesError, RefSide, Stage};
pub use filter::PathFilter;
pub use git::{list_changed_files, list_changes, Change, ChangeAction, ChangeLister};
pub use output::{render, OutputFormat};
