use std::sync::Arc;
use std::time::Duration;

use super::LockError;

/// Proof that a lock was acquired.
///
/// The token identifies this particular acquisition, so releasing a handle
/// whose lock already expired and was taken by someone else is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LockHandle {
    key: String,
    token: u64,
}

impl LockHandle {
    pub fn new(key: impl Into<String>, token: u64) -> Self {
        LockHandle {
            key: key.into(),
            token,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn token(&self) -> u64 {
        self.token
    }
}

/// Trait for a store that grants named, mutually exclusive locks.
///
/// The in-memory gateway uses `Mutex` + `Condvar`; distributed gateways
/// might use Redis, Postgres advisory locks, etcd leases, etc.
pub trait LockGateway: Send + Sync {
    /// Try to take the lock named `key`.
    ///
    /// `timeout` is how long a granted lock lives before it expires. When
    /// `blocking` is set, waits at most `timeout` for the current holder;
    /// otherwise returns immediately. Returns `Ok(None)` if the lock is held.
    /// A zero `timeout` means no expiry and no bound on the wait.
    fn acquire(
        &self,
        key: &str,
        blocking: bool,
        timeout: Duration,
    ) -> Result<Option<LockHandle>, LockError>;

    /// Release a lock. Releasing an expired or already released handle is
    /// not an error.
    fn release(&self, handle: &LockHandle) -> Result<(), LockError>;
}

impl<G: LockGateway + ?Sized> LockGateway for Arc<G> {
    fn acquire(
        &self,
        key: &str,
        blocking: bool,
        timeout: Duration,
    ) -> Result<Option<LockHandle>, LockError> {
        (**self).acquire(key, blocking, timeout)
    }

    fn release(&self, handle: &LockHandle) -> Result<(), LockError> {
        (**self).release(handle)
    }
}
