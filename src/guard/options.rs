use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::KeyError;
use crate::key::KeySpec;

/// Gateway name used when no `cache` is configured.
pub const DEFAULT_CACHE: &str = "default";

/// Lock lifetime (and blocking wait bound) used when no `timeout` is configured.
/// A zero timeout means no expiry and an unbounded wait.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Decoration-time options of a guarded function.
///
/// Deserializes from configuration with every field optional:
///
/// ```
/// use serde_json::json;
/// use task_lock::{KeySpec, LockOptions};
///
/// let options = LockOptions::from_json(&json!({
///     "timeout": 30,
///     "lock_name": ["account_id"],
///     "release_on_completion": true,
/// }))
/// .unwrap();
///
/// assert_eq!(options.cache, "default");
/// assert_eq!(options.lock_name, Some(KeySpec::terms(["account_id"])));
/// assert!(!options.blocking);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockOptions {
    /// Name of the gateway to take locks from.
    pub cache: String,
    /// How long a lock lives, and the longest a blocking acquire waits.
    /// Configured in (possibly fractional) seconds.
    #[serde(with = "seconds")]
    pub timeout: Duration,
    /// Wait for a held lock instead of skipping immediately.
    pub blocking: bool,
    /// How to name the lock; `None` derives it from every argument.
    pub lock_name: Option<KeySpec>,
    /// Release the lock once the guarded function returns.
    pub release_on_completion: bool,
    /// Report skipped invocations at `info` level instead of `debug`.
    pub debug: bool,
}

impl Default for LockOptions {
    fn default() -> Self {
        LockOptions {
            cache: DEFAULT_CACHE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            blocking: false,
            lock_name: None,
            release_on_completion: false,
            debug: false,
        }
    }
}

impl LockOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON configuration value.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, KeyError> {
        serde_json::from_value(value.clone()).map_err(|e| KeyError::Configuration(e.to_string()))
    }

    pub fn with_cache(mut self, cache: impl Into<String>) -> Self {
        self.cache = cache.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }

    pub fn with_lock_name(mut self, spec: impl Into<KeySpec>) -> Self {
        self.lock_name = Some(spec.into());
        self
    }

    pub fn release_on_completion(mut self, release: bool) -> Self {
        self.release_on_completion = release;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

mod seconds {
    use super::*;

    pub fn serialize<S: Serializer>(timeout: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(timeout.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(format!("timeout must be a non-negative number of seconds, got {}", secs))
        })
    }
}
