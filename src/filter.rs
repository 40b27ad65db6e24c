//! Include/exclude glob filtering of changed paths

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};

use crate::git::Change;

/// Keeps paths that match an include pattern (or any path when there are
/// none) and no exclude pattern.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

// `*` must not cross directory boundaries; `**` does.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

impl PathFilter {
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self> {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn matches(&self, path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| p.matches_with(path, MATCH_OPTIONS));
        included && !self.exclude.iter().any(|p| p.matches_with(path, MATCH_OPTIONS))
    }

    /// Drop filtered-out changes, keeping diff order
    pub fn apply(&self, changes: Vec<Change>) -> Vec<Change> {
        if self.is_empty() {
            return changes;
        }
        changes.into_iter().filter(|c| self.matches(&c.path)).collect()
    }
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            let p = p.as_ref();
            Pattern::new(p).with_context(|| format!("Invalid glob pattern: {}", p))
        })
        .collect()
}
