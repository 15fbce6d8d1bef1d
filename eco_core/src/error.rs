use std::path::PathBuf;

use thiserror::Error;

/// Failures loading, fitting or saving a regression model. Loading
/// failures are fatal at service startup.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model missing at {}. Run `eco_trainer train` to create it.", .0.display())]
    Missing(PathBuf),
    #[error("failed to read model at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse model at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write model to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode model: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("model was trained on features {found:?}, serving order is {expected:?}")]
    FeatureMismatch {
        found: Vec<String>,
        expected: Vec<String>,
    },
    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),
    #[error("not enough training rows: got {got}, need at least {need}")]
    NotEnoughRows { got: usize, need: usize },
    #[error("feature and target row counts differ: {features} vs {targets}")]
    RowCountMismatch { features: usize, targets: usize },
    #[error("training row {row} has a non-finite feature or target")]
    NonFinite { row: usize },
    #[error("fitted model produces non-finite output")]
    NonFiniteOutput,
    #[error("model backend error: {0}")]
    Backend(String),
}

/// A per-request inference failure inside a predictor backend.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("model backend error: {0}")]
    Backend(String),
    #[error("unexpected model output shape: {0:?}")]
    OutputShape(Vec<i64>),
}
