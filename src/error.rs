use thiserror::Error;

pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("timestamps must be strictly increasing: index {index} has {current} after {previous}")]
    UnorderedData {
        index: usize,
        previous: i64,
        current: i64,
    },

    #[error("unknown series id {0}")]
    UnknownSeries(u32),

    #[error("scenario `{scenario}` did not complete within {frames} frame(s)")]
    FrameBudgetExhausted { scenario: String, frames: u32 },

    #[error(
        "capture mismatch at `{path}` (expected digest {expected_digest}, actual digest {actual_digest})"
    )]
    CaptureMismatch {
        path: String,
        expected_digest: String,
        actual_digest: String,
    },

    #[error("baseline io failed for `{path}`: {message}")]
    Baseline { path: String, message: String },
}
