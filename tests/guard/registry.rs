//! Choosing a gateway by cache name.

use std::sync::Arc;

use serde_json::json;
use task_lock::{
    call_site, GatewayRegistry, GuardError, InMemoryGateway, LockGuard, LockOptions, Signature,
};

fn registry() -> (GatewayRegistry, Arc<InMemoryGateway>, Arc<InMemoryGateway>) {
    let default = Arc::new(InMemoryGateway::new());
    let redis = Arc::new(InMemoryGateway::new());
    let registry = GatewayRegistry::new()
        .with_gateway("default", default.clone())
        .with_gateway("redis", redis.clone());
    (registry, default, redis)
}

#[test]
fn default_cache_is_used_when_unset() {
    let (registry, default, redis) = registry();
    let guard =
        LockGuard::from_registry("job", Signature::default(), LockOptions::new(), &registry)
            .unwrap();

    guard.invoke(&call_site!(1), || ()).unwrap();

    assert!(default.is_locked("job:1").unwrap());
    assert!(!redis.is_locked("job:1").unwrap());
}

#[test]
fn configured_cache_is_used() {
    let (registry, default, redis) = registry();
    let options = LockOptions::from_json(&json!({ "cache": "redis", "lock_name": "singleton" })).unwrap();
    let guard = LockGuard::from_registry("job", Signature::default(), options, &registry).unwrap();

    guard.invoke(&call_site!(1), || ()).unwrap();

    assert!(redis.is_locked("singleton").unwrap());
    assert!(!default.is_locked("singleton").unwrap());
}

#[test]
fn unknown_cache_is_an_error() {
    let (registry, _, _) = registry();
    let err = LockGuard::from_registry(
        "job",
        Signature::default(),
        LockOptions::new().with_cache("memcached"),
        &registry,
    )
    .unwrap_err();
    assert!(matches!(err, GuardError::UnknownCache(ref name) if name == "memcached"));
}
