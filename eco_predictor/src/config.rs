use serde::Deserialize;
use std::{
    fs,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
    #[error("invalid bind address {0:?}")]
    BindAddr(String),
}

/// Service settings: an optional JSON file, then environment overrides.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    pub model_path: PathBuf,
    pub bind_addr: String,
    pub port: u16,
    /// Log every request's vector summary and result
    pub log_predictions: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/eco_model.json"),
            bind_addr: "0.0.0.0".to_string(),
            port: 8000,
            log_predictions: false,
        }
    }
}

impl ServiceConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `ECO_CONFIG` names the optional file; `MODEL_PATH`, `BIND_ADDR`,
    /// `PORT` and `LOG_PRED` override it.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var("ECO_CONFIG") {
            Ok(path) => Self::load(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|var| std::env::var(var).ok())
    }

    pub fn with_overrides<F>(mut self, get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = get("MODEL_PATH") {
            self.model_path = PathBuf::from(path);
        }
        if let Some(addr) = get("BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(port) = get("PORT") {
            self.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(flag) = get("LOG_PRED") {
            self.log_predictions = flag == "1";
        }
        Ok(self)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .bind_addr
            .parse()
            .map_err(|_| ConfigError::BindAddr(self.bind_addr.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
