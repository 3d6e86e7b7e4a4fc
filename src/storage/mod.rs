//! Durable, origin-scoped storage adapters.

pub mod identity_cache;
