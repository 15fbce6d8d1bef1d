use std::{path::Path, sync::Arc};

use eco_core::{
    ForestModel, ModelError, PredictError, Predictor, RawPrediction, FEATURE_COUNT,
};

/// Load the regression artifact at `path`, picking the backend by extension.
///
/// Any failure here is fatal: the service must not start without a model.
pub fn load_predictor(path: &Path) -> Result<Arc<dyn Predictor>, ModelError> {
    if !path.exists() {
        return Err(ModelError::Missing(path.to_path_buf()));
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Arc::new(ForestModel::load(path)?)),
        Some("pt") | Some("ts") => load_torchscript(path),
        _ => Err(ModelError::UnsupportedFormat(format!(
            "{} (expected .json, .pt or .ts)",
            path.display()
        ))),
    }
}

/// One forward pass on a zero vector so load problems surface before serving.
pub fn warmup(predictor: &dyn Predictor) -> Result<RawPrediction, PredictError> {
    predictor.predict(&[0.0; FEATURE_COUNT])
}

#[cfg(feature = "torch")]
fn load_torchscript(path: &Path) -> Result<Arc<dyn Predictor>, ModelError> {
    Ok(Arc::new(torch::TorchRegressor::load(path)?))
}

#[cfg(not(feature = "torch"))]
fn load_torchscript(path: &Path) -> Result<Arc<dyn Predictor>, ModelError> {
    Err(ModelError::UnsupportedFormat(format!(
        "{} is TorchScript; rebuild eco_predictor with the `torch` feature",
        path.display()
    )))
}

#[cfg(feature = "torch")]
mod torch {
    use std::path::Path;

    use eco_core::{
        FeatureVector, ModelError, PredictError, Predictor, RawPrediction, FEATURE_COUNT,
    };
    use tch::{kind::Kind, CModule, Device, Tensor};

    const OUTPUT_SHAPE: [i64; 2] = [1, 2];

    /// TorchScript module mapping a `[1, 8]` float input to `[1, 2]` (fuel_l, co2_kg).
    pub struct TorchRegressor {
        model: CModule,
        device: Device,
    }

    impl TorchRegressor {
        pub fn load(path: &Path) -> Result<Self, ModelError> {
            let device = Device::Cpu;
            let model = CModule::load_on_device(path, device).map_err(|e| {
                ModelError::Backend(format!("failed to load TorchScript {}: {}", path.display(), e))
            })?;

            // Check output shape with a dummy forward
            let dummy = Tensor::zeros([1, FEATURE_COUNT as i64], (Kind::Float, device));
            let t = model
                .forward_ts(&[dummy])
                .map_err(|e| ModelError::Backend(e.to_string()))?;
            let sz = t.size();
            if sz != OUTPUT_SHAPE {
                return Err(ModelError::Backend(format!(
                    "unexpected model output size: {:?}",
                    sz
                )));
            }

            Ok(Self { model, device })
        }
    }

    impl Predictor for TorchRegressor {
        fn predict(&self, x: &FeatureVector) -> Result<RawPrediction, PredictError> {
            let xs: Vec<f32> = x.iter().map(|v| *v as f32).collect();
            let input = Tensor::from_slice(&xs)
                .reshape([1, FEATURE_COUNT as i64])
                .to_device(self.device);

            let t = self
                .model
                .forward_ts(&[input])
                .map_err(|e| PredictError::Backend(e.to_string()))?;
            let sz = t.size();
            if sz != OUTPUT_SHAPE {
                return Err(PredictError::OutputShape(sz));
            }

            let out = t.to_kind(Kind::Double);
            Ok(RawPrediction::new(
                out.double_value(&[0, 0]),
                out.double_value(&[0, 1]),
            ))
        }

        fn name(&self) -> &str {
            "torchscript"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_artifact_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_predictor(&dir.path().join("eco_model.json")).err().unwrap();
        assert!(matches!(err, ModelError::Missing(_)));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eco_model.pkl");
        fs::write(&path, b"\x80\x04").unwrap();
        let err = load_predictor(&path).err().unwrap();
        assert!(matches!(err, ModelError::UnsupportedFormat(_)));
    }

    #[cfg(not(feature = "torch"))]
    #[test]
    fn test_torchscript_needs_feature() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eco_model.pt");
        fs::write(&path, b"").unwrap();
        let err = load_predictor(&path).err().unwrap();
        assert!(err.to_string().contains("`torch` feature"));
    }
}
