use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use url_shortener::{config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    init_tracing(&config.log_level, &config.log_format);
    config.print_summary();

    server::run(config).await
}

fn init_tracing(log_level: &str, log_format: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format {
        "json" => registry
            .with(fmt::layer().json().with_target(true).with_current_span(false))
            .init(),
        _ => registry.with(fmt::layer().with_target(true)).init(),
    }
}
