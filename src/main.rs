use linkhub::config;
use linkhub::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    init_tracing(&config.log_level, &config.log_format);

    config.print_summary();

    server::run(config).await
}

/// Installs the global subscriber; `format` is `text` or `json`.
fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
