/// Learner errors.
#[derive(Debug, thiserror::Error)]
pub enum LearningError {
    #[error("malformed correction at index {index}: {reason}")]
    MalformedCorrection { index: usize, reason: String },

    #[error("batch of {size} corrections exceeds the {max} item limit")]
    BatchTooLarge { size: usize, max: usize },
}
