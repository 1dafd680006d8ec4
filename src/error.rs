use thiserror::Error;

use crate::lock::LockError;
use crate::value::Accessor;

/// Errors raised while validating a key specification or deriving a lock key.
///
/// All of these surface before the guarded function is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The key specification or signature is malformed.
    #[error("lock is configured incorrectly: {0}")]
    Configuration(String),
    /// A term names a parameter that is neither passed nor defaulted.
    #[error("lock is configured incorrectly: could not find parameter \"{name}\" in function call or definition")]
    ParameterNotFound { name: String },
    /// A chain hop could not be resolved against the value at that point.
    #[error("lock is configured incorrectly: could not find attribute/key \"{accessor}\" of {value}")]
    AttributeNotFound { accessor: Accessor, value: String },
}

/// Error type for guarded invocations.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error(transparent)]
    Lock(#[from] LockError),
    /// No gateway is registered under the configured cache name.
    #[error("no lock gateway registered for cache \"{0}\"")]
    UnknownCache(String),
}
