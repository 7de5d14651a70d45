use anyhow::Result;
use clap::Parser;
use covidmap::{
    config::{Args, Config},
    pipeline,
};
use reqwest::Client;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,covidmap=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) configure ────────────────────────────────────────────────
    let config = Config::from(Args::parse());
    info!(source = %config.source, output = %config.output.display(), "startup");

    // ─── 3) scrape, clean, render ────────────────────────────────────
    let client = Client::new();
    let dataset = pipeline::run(&client, &config).await?;

    info!(countries = dataset.len(), "all done");
    Ok(())
}
