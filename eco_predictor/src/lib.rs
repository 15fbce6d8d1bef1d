pub mod app;
pub mod config;
pub mod model;

pub use app::{router, AppState};
pub use config::{ConfigError, ServiceConfig};
