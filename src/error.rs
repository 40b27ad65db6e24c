//! Error types for change listing

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which side of the comparison a reference belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefSide {
    Head,
    Base,
}

impl fmt::Display for RefSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefSide::Head => write!(f, "head"),
            RefSide::Base => write!(f, "base"),
        }
    }
}

/// Step of the listing operation an error is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Open,
    ResolveHead,
    ResolveBase,
    Diff,
    Classify,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Open => "open",
            Stage::ResolveHead => "resolve-head",
            Stage::ResolveBase => "resolve-base",
            Stage::Diff => "diff",
            Stage::Classify => "classify",
        };
        f.write_str(name)
    }
}

impl From<RefSide> for Stage {
    fn from(side: RefSide) -> Self {
        match side {
            RefSide::Head => Stage::ResolveHead,
            RefSide::Base => Stage::ResolveBase,
        }
    }
}

#[derive(Error, Debug)]
pub enum ChangesError {
    #[error("error opening repository at '{path}': {source}")]
    RepositoryOpen {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("error getting tree from {side} ref '{reference}': {source}")]
    RevisionResolution {
        side: RefSide,
        reference: String,
        #[source]
        source: git2::Error,
    },

    #[error("error diffing trees: {0}")]
    DiffComputation(#[source] git2::Error),

    #[error("unsupported change action {status:?} for path {}", .path.as_deref().unwrap_or("<none>"))]
    UnsupportedChangeAction {
        status: git2::Delta,
        path: Option<String>,
    },

    #[error("operation canceled before {0}")]
    Canceled(Stage),
}

impl ChangesError {
    /// The step that produced this error
    pub fn stage(&self) -> Stage {
        match self {
            ChangesError::RepositoryOpen { .. } => Stage::Open,
            ChangesError::RevisionResolution { side, .. } => (*side).into(),
            ChangesError::DiffComputation(_) => Stage::Diff,
            ChangesError::UnsupportedChangeAction { .. } => Stage::Classify,
            ChangesError::Canceled(stage) => *stage,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChangesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_from_resolution_side() {
        let err = ChangesError::RevisionResolution {
            side: RefSide::Base,
            reference: "nope".to_string(),
            source: git2::Error::from_str("not found"),
        };
        assert_eq!(err.stage(), Stage::ResolveBase);
        assert_eq!(
            err.to_string(),
            "error getting tree from base ref 'nope': not found"
        );
    }

    #[test]
    fn test_unsupported_action_message() {
        let err = ChangesError::UnsupportedChangeAction {
            status: git2::Delta::Renamed,
            path: None,
        };
        assert_eq!(err.stage(), Stage::Classify);
        assert_eq!(
            err.to_string(),
            "unsupported change action Renamed for path <none>"
        );
    }

    #[test]
    fn test_canceled_message() {
        let err = ChangesError::Canceled(Stage::ResolveHead);
        assert_eq!(err.to_string(), "operation canceled before resolve-head");
    }
}
