pub mod dataset;
pub mod synth;
pub mod train;

use eco_core::{ModelError, PredictError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("test fraction must be strictly between 0 and 1, got {0}")]
    TestFraction(f64),
    #[error("cannot split {rows} rows with test fraction {test_fraction}")]
    Split { rows: usize, test_fraction: f64 },
    #[error("dataset columns {found:?} do not match {expected:?}")]
    Header {
        found: Vec<String>,
        expected: Vec<String>,
    },
    #[error("line {line}: {value:?} is not a finite number")]
    Value { line: usize, value: String },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("scoring the held-out rows failed: {0}")]
    Predict(#[from] PredictError),
}
