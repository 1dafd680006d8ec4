use thiserror::Error;

/// Error type for lock gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// The underlying lock primitive was poisoned (e.g. a thread panicked while holding it).
    #[error("lock poisoned: {0}")]
    Poisoned(String),
    /// The store could not be asked for the lock.
    #[error("lock acquire failed: {0}")]
    AcquireFailed(String),
    /// The store could not release the lock.
    #[error("lock release failed: {0}")]
    ReleaseFailed(String),
    /// Any other lock error.
    #[error("lock error: {0}")]
    Other(String),
}
