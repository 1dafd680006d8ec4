//! Guarded invocation integration tests.

mod concurrency;
mod registry;
