use eco_core::{FeatureVector, ForestModel, ForestParams, RawPrediction};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::synth::TrainingRow;
use crate::TrainError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainReport {
    pub train_rows: usize,
    pub test_rows: usize,
    /// Held-out R^2, averaged over fuel_l and co2_kg
    pub r2: f64,
}

/// Shuffle with `seed` and cut off `test_fraction` of the rows for evaluation.
pub fn split(
    mut rows: Vec<TrainingRow>,
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<TrainingRow>, Vec<TrainingRow>), TrainError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(TrainError::TestFraction(test_fraction));
    }
    let test_rows = (rows.len() as f64 * test_fraction).round() as usize;
    if test_rows == 0 || test_rows >= rows.len() {
        return Err(TrainError::Split {
            rows: rows.len(),
            test_fraction,
        });
    }
    rows.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    let test = rows.split_off(rows.len() - test_rows);
    Ok((rows, test))
}

fn columns(rows: &[TrainingRow]) -> (Vec<FeatureVector>, Vec<RawPrediction>) {
    rows.iter().map(|r| (r.x, r.y)).unzip()
}

pub fn train(
    rows: Vec<TrainingRow>,
    test_fraction: f64,
    seed: u64,
    params: ForestParams,
) -> Result<(ForestModel, TrainReport), TrainError> {
    let (train_set, test_set) = split(rows, test_fraction, seed)?;
    let (x_train, y_train) = columns(&train_set);
    let (x_test, y_test) = columns(&test_set);

    let model = ForestModel::fit(&x_train, &y_train, params)?;
    let report = TrainReport {
        train_rows: train_set.len(),
        test_rows: test_set.len(),
        r2: model.r2_score(&x_test, &y_test)?,
    };
    Ok((model, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::SyntheticGenerator;
    use eco_core::{ModelError, ProfileRegistry};

    fn rows(n: usize) -> Vec<TrainingRow> {
        SyntheticGenerator::new(11, ProfileRegistry::builtin()).generate(n)
    }

    #[test]
    fn test_split_sizes() {
        let (train, test) = split(rows(100), 0.2, 42).unwrap();
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
    }

    #[test]
    fn test_split_is_seeded() {
        let (_, a) = split(rows(100), 0.2, 42).unwrap();
        let (_, b) = split(rows(100), 0.2, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_fraction() {
        for f in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(split(rows(20), f, 1), Err(TrainError::TestFraction(_))));
        }
    }

    #[test]
    fn test_too_small_for_split() {
        assert!(matches!(split(rows(2), 0.1, 1), Err(TrainError::Split { .. })));
    }

    fn small() -> ForestParams {
        ForestParams {
            n_trees: 10,
            max_depth: 8,
            min_samples_leaf: 2,
            seed: 3,
        }
    }

    #[test]
    fn test_train_reports_positive_r2() {
        let (model, report) = train(rows(1000), 0.2, 42, small()).unwrap();
        assert_eq!(report.train_rows, 800);
        assert_eq!(report.test_rows, 200);
        assert!(report.r2.is_finite() && report.r2 > 0.5, "r2 = {}", report.r2);
        assert_eq!(model.feature_names.len(), 8);
        assert_eq!(model.params, small());
    }

    #[test]
    fn test_train_rejects_non_finite_rows() {
        let mut data = rows(50);
        for row in data.iter_mut().step_by(2) {
            row.y.co2_kg = f64::NAN;
        }
        let err = train(data, 0.2, 42, small()).err().unwrap();
        assert!(matches!(err, TrainError::Model(ModelError::NonFinite { .. })), "{}", err);
    }
}
