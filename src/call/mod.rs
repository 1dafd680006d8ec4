//! Call-time argument binding.
//!
//! A [`Signature`] describes what a guarded function declares, a
//! [`CallSite`] what one invocation actually passed, and [`bind`] answers
//! which value a parameter name ends up bound to.

mod binder;
mod call_site;
mod signature;

pub use binder::{bind, Binding};
pub use call_site::CallSite;
pub use signature::Signature;
