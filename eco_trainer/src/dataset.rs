use std::path::Path;

use eco_core::{RawPrediction, FEATURE_COUNT, FEATURE_NAMES};

use crate::synth::TrainingRow;
use crate::TrainError;

pub const TARGET_NAMES: [&str; 2] = ["fuel_l", "co2_kg"];

fn header() -> Vec<&'static str> {
    FEATURE_NAMES.iter().chain(TARGET_NAMES.iter()).copied().collect()
}

/// Write rows as CSV: the model columns in serving order, then both targets.
pub fn write_csv(path: &Path, rows: &[TrainingRow]) -> Result<(), TrainError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header())?;
    for row in rows {
        let record: Vec<String> = row
            .x
            .iter()
            .chain([row.y.fuel_l, row.y.co2_kg].iter())
            .map(|v| v.to_string())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_csv(path: &Path) -> Result<Vec<TrainingRow>, TrainError> {
    let mut reader = csv::Reader::from_path(path)?;
    let found: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if found.iter().map(String::as_str).ne(header()) {
        return Err(TrainError::Header {
            found,
            expected: header().iter().map(|s| s.to_string()).collect(),
        });
    }

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let mut values = [0.0; FEATURE_COUNT + 2];
        for (slot, field) in values.iter_mut().zip(record.iter()) {
            let bad = || TrainError::Value {
                line: i + 2,
                value: field.to_string(),
            };
            let v: f64 = field.trim().parse().map_err(|_| bad())?;
            // f64 parsing accepts "NaN" and "inf"; neither is a usable sample
            if !v.is_finite() {
                return Err(bad());
            }
            *slot = v;
        }
        let mut x = [0.0; FEATURE_COUNT];
        x.copy_from_slice(&values[..FEATURE_COUNT]);
        rows.push(TrainingRow {
            x,
            y: RawPrediction::new(values[FEATURE_COUNT], values[FEATURE_COUNT + 1]),
        });
    }
    Ok(rows)
}
