//! # tally-cache
//!
//! Two-tier pattern cache. The in-process tier (moka) answers hot reads in
//! sub-microsecond time; the shared tier is a cross-process backstop behind
//! a circuit breaker; the source of truth catches every miss. Shared-tier
//! unavailability degrades performance, never correctness.

pub mod breaker;
pub mod cache;
pub mod memory_tier;
pub mod shared;

pub use breaker::{BreakerState, CircuitBreaker};
pub use cache::PatternCache;
pub use shared::MemorySharedCache;
