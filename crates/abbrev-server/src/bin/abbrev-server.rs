use abbrev_core::AbbrevConfig;
use abbrev_server::{app_with_state, state::AppState};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ABBREV_CONFIG").ok())
        .unwrap_or_else(|| "config.json".to_string());
    let config = AbbrevConfig::load_or_default(&config_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.application.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr = config.bind_addr();
    let state = AppState::from_config(config).context("failed to initialize service")?;
    tracing::info!(
        service = %state.config.application.name,
        dictionary_size = state.dictionary.len(),
        model = state.abbreviator.model_status().available,
        "starting"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await.with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app_with_state(state)).await?;
    Ok(())
}
