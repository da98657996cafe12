use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use astrologic_client::SynthesisClient;
use astrologic_core::{CoreConfig, ReadingParser};

/// Main entry point for the AstroLogic web front end.
///
/// Serves the intake form, result pages and JSON API on one address. Configuration is read from
/// the environment (and `.env`) once, here, and passed down.
///
/// # Environment Variables
/// - `ASTRO_REST_ADDR`: listen address (default: "0.0.0.0:3000")
/// - `ASTRO_SYNTHESIS_URL`: base URL of the synthesis service (default: "http://localhost:8000")
/// - `ASTRO_REQUEST_TIMEOUT_SECS`: synthesis request timeout in seconds (default: 60)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the listen address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("astrologic_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("astrologic_client=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::from_env_values(
        std::env::var("ASTRO_SYNTHESIS_URL").ok(),
        std::env::var("ASTRO_REQUEST_TIMEOUT_SECS").ok(),
        std::env::var("ASTRO_REST_ADDR").ok(),
    )?;

    tracing::info!("++ Starting AstroLogic on {}", cfg.rest_addr());
    tracing::info!(
        "++ Synthesis service at {} (timeout {:?})",
        cfg.synthesis_url(),
        cfg.request_timeout()
    );

    let client = SynthesisClient::new(&cfg)?;
    let app = api_rest::app(AppState::new(ReadingParser::standard(), client));

    let listener = tokio::net::TcpListener::bind(cfg.rest_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
