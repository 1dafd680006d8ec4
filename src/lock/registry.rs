use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::LockGateway;

/// Named lock gateways, looked up by a guard's `cache` option.
#[derive(Clone, Default)]
pub struct GatewayRegistry {
    gateways: HashMap<String, Arc<dyn LockGateway>>,
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a gateway. Returns `self` for chaining.
    pub fn with_gateway(mut self, name: impl Into<String>, gateway: Arc<dyn LockGateway>) -> Self {
        self.insert(name, gateway);
        self
    }

    /// Register a gateway, replacing any previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, gateway: Arc<dyn LockGateway>) {
        self.gateways.insert(name.into(), gateway);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn LockGateway>> {
        self.gateways.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.gateways.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for GatewayRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayRegistry")
            .field("gateways", &self.names())
            .finish()
    }
}
