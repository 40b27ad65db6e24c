//! Cooperative cancellation for change listing
//!
//! A `Cancellation` is a cloneable flag. The caller keeps one clone and flips
//! it; the listing operation checks it between I/O steps and stops with
//! `ChangesError::Canceled` once it is set.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{ChangesError, Result, Stage};

#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    canceled: Arc<AtomicBool>,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    /// Fail with `Canceled(stage)` if cancellation was requested
    pub fn check(&self, stage: Stage) -> Result<()> {
        if self.is_canceled() {
            tracing::debug!(%stage, "change listing canceled");
            return Err(ChangesError::Canceled(stage));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_passes() {
        let token = Cancellation::new();
        assert!(!token.is_canceled());
        assert!(token.check(Stage::Open).is_ok());
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let token = Cancellation::new();
        let observer = token.clone();
        token.cancel();

        assert!(observer.is_canceled());
        let err = observer.check(Stage::Diff).unwrap_err();
        assert!(matches!(err, ChangesError::Canceled(Stage::Diff)));
    }
}
