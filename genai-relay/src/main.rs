use genai_relay::config::RelayConfig;
use genai_relay::startup::Application;
use relay_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RelayConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "genai-relay",
        &config.telemetry.log_level,
        config.telemetry.otlp_endpoint.as_deref(),
    )?;

    let app = Application::build(config).await?;
    app.run_until_stopped().await?;

    Ok(())
}
