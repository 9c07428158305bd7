use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trails::{config::Config, run_server};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env();
    tracing::info!(gpx_dir = %config.gpx_dir.display(), "Starting trails server");

    run_server(config).await
}
