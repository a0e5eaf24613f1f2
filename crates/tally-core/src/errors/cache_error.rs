/// Cache-layer errors. Fetches never surface these to callers: a failing
/// shared tier degrades to source-of-truth reads with a logged warning.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("shared cache tier unavailable: {reason}")]
    SharedTierUnavailable { reason: String },
}
