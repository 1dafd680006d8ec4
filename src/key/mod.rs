//! Lock-key derivation.
//!
//! A [`KeySpec`] is fixed when a function is guarded; [`build_key`] applies
//! it to each call. Derivation is pure: it reads the signature, the call
//! site and the key spec, and touches no shared state.

mod builder;
mod spec;

pub use builder::{build_key, LockKey};
pub use spec::{KeySpec, KeyTerm, Term};
