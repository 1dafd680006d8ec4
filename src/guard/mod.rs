//! Guarded invocation.
//!
//! A [`LockGuard`] is created once per guarded function. For each call it
//! derives the lock key, asks its gateway for the lock, and either runs the
//! function or reports the call as skipped.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use task_lock::{call_site, InMemoryGateway, KeySpec, LockGuard, LockOptions, Signature};
//!
//! let guard = LockGuard::new(
//!     "charge",
//!     Signature::new(["account_id", "amount"]),
//!     LockOptions::new()
//!         .with_lock_name(KeySpec::terms(["account_id"]))
//!         .release_on_completion(true),
//!     Arc::new(InMemoryGateway::new()),
//! )
//! .unwrap();
//!
//! let outcome = guard.invoke(&call_site!("acct-1", 250), || "charged").unwrap();
//! assert_eq!(outcome.completed(), Some("charged"));
//! ```

mod locked;
mod options;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::call::{CallSite, Signature};
use crate::error::{GuardError, KeyError};
use crate::key::{build_key, LockKey};
use crate::lock::{GatewayRegistry, LockError, LockGateway, LockHandle};

pub use locked::Locked;
pub use options::{LockOptions, DEFAULT_CACHE, DEFAULT_TIMEOUT_SECS};

/// Result of a guarded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation<R> {
    /// The lock was acquired and the function ran.
    Completed(R),
    /// Another holder had the lock; the function did not run.
    Skipped(LockKey),
}

impl<R> Invocation<R> {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Invocation::Skipped(_))
    }

    pub fn completed(self) -> Option<R> {
        match self {
            Invocation::Completed(result) => Some(result),
            Invocation::Skipped(_) => None,
        }
    }

    /// The function's result, or `fallback` if the call was skipped.
    pub fn unwrap_or(self, fallback: R) -> R {
        self.completed().unwrap_or(fallback)
    }
}

/// Runs calls of one function under a lock named from their arguments.
pub struct LockGuard {
    name: String,
    signature: Signature,
    options: LockOptions,
    gateway: Arc<dyn LockGateway>,
}

impl LockGuard {
    /// Create a guard for the function `name`.
    ///
    /// Fails with a configuration error if the signature has duplicate
    /// parameters or the key spec names a parameter it does not declare.
    pub fn new(
        name: impl Into<String>,
        signature: Signature,
        options: LockOptions,
        gateway: Arc<dyn LockGateway>,
    ) -> Result<Self, KeyError> {
        signature.validate()?;
        if let Some(spec) = &options.lock_name {
            spec.validate(&signature)?;
        }
        Ok(LockGuard {
            name: name.into(),
            signature,
            options,
            gateway,
        })
    }

    /// Create a guard whose gateway is the one registered under `options.cache`.
    pub fn from_registry(
        name: impl Into<String>,
        signature: Signature,
        options: LockOptions,
        registry: &GatewayRegistry,
    ) -> Result<Self, GuardError> {
        let gateway = registry
            .get(&options.cache)
            .ok_or_else(|| GuardError::UnknownCache(options.cache.clone()))?;
        Ok(Self::new(name, signature, options, gateway)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn options(&self) -> &LockOptions {
        &self.options
    }

    /// The key a call would lock under.
    pub fn key(&self, call: &CallSite) -> Result<LockKey, KeyError> {
        build_key(
            &self.name,
            &self.signature,
            call,
            self.options.lock_name.as_ref(),
        )
    }

    /// Take the lock for `call` without running anything.
    ///
    /// Returns `Ok(None)` if another holder has it. The returned [`HeldLock`]
    /// releases on drop when `release_on_completion` is set; otherwise the
    /// lock stays until it expires.
    pub fn enter(&self, call: &CallSite) -> Result<Option<HeldLock<'_>>, GuardError> {
        Ok(self.try_lock(call)?.ok())
    }

    /// Run `f` if the lock for `call` can be taken.
    ///
    /// Key derivation errors are returned before `f` could run. Whatever `f`
    /// returns is passed through untouched, including its own errors.
    pub fn invoke<R, F>(&self, call: &CallSite, f: F) -> Result<Invocation<R>, GuardError>
    where
        F: FnOnce() -> R,
    {
        match self.try_lock(call)? {
            Ok(held) => {
                let result = f();
                drop(held);
                Ok(Invocation::Completed(result))
            }
            Err(key) => Ok(Invocation::Skipped(key)),
        }
    }

    /// `Err(key)` when the lock is held elsewhere.
    fn try_lock(&self, call: &CallSite) -> Result<Result<HeldLock<'_>, LockKey>, GuardError> {
        let key = self.key(call)?;
        let handle = self.gateway.acquire(
            key.as_str(),
            self.options.blocking,
            self.options.timeout,
        )?;

        match handle {
            Some(handle) => {
                debug!(lock = %key, "lock acquired");
                Ok(Ok(HeldLock {
                    gateway: self.gateway.as_ref(),
                    handle: Some(handle),
                    key,
                    release_on_drop: self.options.release_on_completion,
                }))
            }
            None => {
                if self.options.debug {
                    info!(lock = %key, "{} lock already acquired...return", key);
                } else {
                    debug!(lock = %key, "lock already acquired, skipping");
                }
                Ok(Err(key))
            }
        }
    }
}

impl fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockGuard")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A lock taken by [`LockGuard::enter`].
///
/// If the guard releases on completion, dropping this releases the lock,
/// also when unwinding. Release failures are logged and discarded.
#[must_use = "the lock is released (or left to expire) as soon as this is dropped"]
pub struct HeldLock<'g> {
    gateway: &'g dyn LockGateway,
    handle: Option<LockHandle>,
    key: LockKey,
    release_on_drop: bool,
}

impl HeldLock<'_> {
    pub fn key(&self) -> &LockKey {
        &self.key
    }

    pub fn handle(&self) -> Option<&LockHandle> {
        self.handle.as_ref()
    }

    /// Release now, regardless of `release_on_completion`.
    pub fn release(mut self) -> Result<(), LockError> {
        match self.handle.take() {
            Some(handle) => self.gateway.release(&handle),
            None => Ok(()),
        }
    }
}

impl Drop for HeldLock<'_> {
    fn drop(&mut self) {
        if !self.release_on_drop {
            return;
        }
        if let Some(handle) = self.handle.take() {
            match self.gateway.release(&handle) {
                Ok(()) => debug!(lock = %self.key, "lock released"),
                Err(e) => warn!(lock = %self.key, error = %e, "lock release failed"),
            }
        }
    }
}
