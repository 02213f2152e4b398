//! Cooperative cancellation for in-flight splits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable flag that cancels an in-flight split.
///
/// Hand a clone to [`Splitter::split_cancellable`] and keep one; calling
/// [`cancel`] makes the split iterator stop at the next byte boundary, yield
/// [`SplitError::Cancelled`] once, and discard any partially accumulated
/// chunk.
///
/// # Example
///
/// ```
/// use splitrs::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
///
/// [`Splitter::split_cancellable`]: crate::Splitter::split_cancellable
/// [`cancel`]: CancelToken::cancel
/// [`SplitError::Cancelled`]: crate::SplitError::Cancelled
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a new, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());

        clone.cancel();
        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());

        // Idempotent
        token.cancel();
        assert!(token.is_cancelled());
    }
}
