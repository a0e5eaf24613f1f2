//! # tally-engine
//!
//! The facade over the whole categorization core. Owns nothing clever:
//! fetches candidates through the cache, ranks them with the matcher,
//! scores them with the calculator, and routes corrections to the learner.
//! All state lives in the injected store and caches.

pub mod engine;
pub mod telemetry;

pub use engine::Engine;
pub use telemetry::init_tracing;
