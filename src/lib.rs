//! Lock-guarded function calls.
//!
//! Wrap a function so that each call first takes a lock named after its
//! arguments, and runs only if nobody else holds that lock:
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use task_lock::{
//!     call_site, CallSite, InMemoryGateway, KeySpec, KeyTerm, LockGateway, LockGuard, LockOptions, Locked,
//!     Signature, Term,
//! };
//!
//! let gateway = Arc::new(InMemoryGateway::new());
//!
//! // sync_order(order, tenant=None, region="eu")
//! let signature = Signature::new(["order", "tenant", "region"])
//!     .with_defaults([json!(null), json!("eu")])
//!     .unwrap();
//! let options = LockOptions::new().with_lock_name(KeySpec::terms([
//!     KeyTerm::from(Term::chain("order", ["customer", "id"])),
//!     KeyTerm::priority(["tenant", "region"]),
//! ]));
//!
//! let guard = LockGuard::new("sync_order", signature, options, gateway.clone()).unwrap();
//! let sync_order = Locked::with_fallback(guard, |_: &CallSite| "synced", "locked");
//!
//! let call = call_site!(json!({ "customer": { "id": 42 } }));
//! assert_eq!(sync_order.guard().key(&call).unwrap(), "sync_order:42:eu");
//!
//! // While someone else holds the lock, the call is skipped.
//! let held = gateway.acquire("sync_order:42:eu", false, std::time::Duration::from_secs(60)).unwrap().unwrap();
//! assert_eq!(sync_order.call(&call).unwrap(), "locked");
//!
//! gateway.release(&held).unwrap();
//! assert_eq!(sync_order.call(&call).unwrap(), "synced");
//! ```

mod call;
mod error;
mod guard;
mod key;
mod lock;
mod value;

pub use call::{bind, Binding, CallSite, Signature};
pub use error::{GuardError, KeyError};
pub use guard::{
    HeldLock, Invocation, LockGuard, LockOptions, Locked, DEFAULT_CACHE, DEFAULT_TIMEOUT_SECS,
};
pub use key::{build_key, KeySpec, KeyTerm, LockKey, Term};
pub use lock::{GatewayRegistry, InMemoryGateway, LockError, LockGateway, LockHandle};
pub use value::{resolve, resolve_path, Accessor, Object, Value};
