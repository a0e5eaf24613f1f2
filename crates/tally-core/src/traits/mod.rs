//! Boundary traits. The core talks to the outside world only through these.

mod match_source;
mod pattern_store;
mod shared_cache;

pub use match_source::MatchSource;
pub use pattern_store::IPatternStore;
pub use shared_cache::ISharedCache;
