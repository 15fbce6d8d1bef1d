use anyhow::Context;
use eco_core::{EcoEstimator, ProfileRegistry};
use eco_predictor::{model, router, AppState, ServiceConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cfg = ServiceConfig::from_env().context("invalid service configuration")?;
    let addr = cfg.socket_addr()?;

    let predictor = model::load_predictor(&cfg.model_path)
        .with_context(|| format!("failed to load model from {}", cfg.model_path.display()))?;
    tracing::info!("loaded {} model from {}", predictor.name(), cfg.model_path.display());

    let warm = model::warmup(predictor.as_ref()).context("warmup forward failed")?;
    tracing::info!("warmup forward ok (fuel_l={:.3}, co2_kg={:.3})", warm.fuel_l, warm.co2_kg);

    let estimator = EcoEstimator::new(Arc::new(ProfileRegistry::builtin()), predictor);
    let app = router(AppState::new(estimator, cfg.log_predictions));

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
