use super::{Invocation, LockGuard};
use crate::call::CallSite;
use crate::error::GuardError;

/// A function wrapped with a [`LockGuard`].
///
/// Calling it runs the function under the lock, or returns the fallback
/// when another holder has the lock.
pub struct Locked<F, R> {
    guard: LockGuard,
    func: F,
    fallback: R,
}

impl<F, R> Locked<F, R>
where
    F: Fn(&CallSite) -> R,
    R: Clone,
{
    /// Wrap `func`; skipped calls return `R::default()`.
    pub fn new(guard: LockGuard, func: F) -> Self
    where
        R: Default,
    {
        Self::with_fallback(guard, func, R::default())
    }

    /// Wrap `func`; skipped calls return a clone of `fallback`.
    pub fn with_fallback(guard: LockGuard, func: F, fallback: R) -> Self {
        Locked {
            guard,
            func,
            fallback,
        }
    }

    pub fn call(&self, call: &CallSite) -> Result<R, GuardError> {
        let outcome = self.guard.invoke(call, || (self.func)(call))?;
        Ok(match outcome {
            Invocation::Completed(result) => result,
            Invocation::Skipped(_) => self.fallback.clone(),
        })
    }

    pub fn guard(&self) -> &LockGuard {
        &self.guard
    }

    pub fn fallback(&self) -> &R {
        &self.fallback
    }
}
