//! Lock gateways: the stores locks are taken from.
//!
//! `LockGateway` is the only thing a guard needs from a store.
//! `InMemoryGateway` serves single-process use and tests; `GatewayRegistry`
//! names several gateways so configuration can pick one by its `cache` name.

mod error;
mod gateway;
mod in_memory;
mod registry;

pub use error::LockError;
pub use gateway::{LockGateway, LockHandle};
pub use in_memory::InMemoryGateway;
pub use registry::GatewayRegistry;
