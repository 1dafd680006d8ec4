use std::collections::HashMap;
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use super::{LockError, LockGateway, LockHandle};

struct Held {
    token: u64,
    expires_at: Option<Instant>,
}

impl Held {
    fn expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[derive(Default)]
struct State {
    held: HashMap<String, Held>,
    next_token: u64,
}

/// In-memory gateway backed by a `Mutex<HashMap>` + `Condvar`.
///
/// Each granted lock expires after the `timeout` it was acquired with, after
/// which it can be taken again. Blocking acquisition waits on the condvar
/// until the holder releases, the holder's lock expires, or the wait times out.
/// A zero `timeout` is unbounded: the lock never expires and a blocking
/// acquire waits until the holder releases.
pub struct InMemoryGateway {
    state: Mutex<State>,
    wake: Condvar,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        InMemoryGateway {
            state: Mutex::new(State::default()),
            wake: Condvar::new(),
        }
    }

    /// Whether `key` is currently held by an unexpired lock.
    pub fn is_locked(&self, key: &str) -> Result<bool, LockError> {
        let state = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        let now = Instant::now();
        Ok(state.held.get(key).is_some_and(|held| !held.expired(now)))
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl LockGateway for InMemoryGateway {
    fn acquire(
        &self,
        key: &str,
        blocking: bool,
        timeout: Duration,
    ) -> Result<Option<LockHandle>, LockError> {
        // `None` means the wait (or the lock's lifetime) is unbounded.
        let bound = (!timeout.is_zero()).then_some(timeout);
        let deadline = bound.and_then(|t| Instant::now().checked_add(t));
        let mut state = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;

        loop {
            let now = Instant::now();
            let holder = state
                .held
                .get(key)
                .filter(|held| !held.expired(now))
                .map(|held| held.expires_at);
            let holder_expires = match holder {
                Some(expires_at) => expires_at,
                None => {
                    state.held.retain(|_, held| !held.expired(now));
                    state.next_token += 1;
                    let token = state.next_token;
                    state.held.insert(
                        key.to_string(),
                        Held {
                            token,
                            expires_at: bound.and_then(|t| now.checked_add(t)),
                        },
                    );
                    return Ok(Some(LockHandle::new(key, token)));
                }
            };

            if !blocking {
                return Ok(None);
            }

            let wait_until = match (deadline, holder_expires) {
                (Some(d), _) if d <= now => return Ok(None),
                (Some(d), Some(h)) => Some(d.min(h)),
                (d, h) => d.or(h),
            };

            state = match wait_until {
                Some(at) => {
                    self.wake
                        .wait_timeout(state, at.saturating_duration_since(now))
                        .map_err(|e| LockError::Poisoned(e.to_string()))?
                        .0
                }
                None => self
                    .wake
                    .wait(state)
                    .map_err(|e| LockError::Poisoned(e.to_string()))?,
            };
        }
    }

    fn release(&self, handle: &LockHandle) -> Result<(), LockError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        let owned = state
            .held
            .get(handle.key())
            .is_some_and(|held| held.token == handle.token());
        if owned {
            state.held.remove(handle.key());
            self.wake.notify_all();
        }
        Ok(())
    }
}
