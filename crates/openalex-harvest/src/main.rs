//! OpenAlex Open-Access Harvester - Entry Point
//!
//! Every flag has a default, so a bare invocation collects open-access
//! works for institutions matching "Illinois" into
//! `illinois_open_research.json`.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use openalex_harvest::{Config, Harvester};

#[derive(Parser, Debug)]
#[command(name = "openalex-harvest")]
#[command(about = "Collect open-access work metadata from the OpenAlex API")]
#[command(version)]
struct Cli {
    /// Institution display-name filter
    #[arg(long, default_value = "Illinois")]
    filter: String,

    /// Per-institution cap on collected works
    #[arg(long, default_value_t = 50)]
    max_works: u32,

    /// Output file path (overwritten each run)
    #[arg(long, default_value = "illinois_open_research.json")]
    output: PathBuf,

    /// Contact address for the OpenAlex polite pool (goes into User-Agent)
    #[arg(long, env = "OPENALEX_MAILTO")]
    mailto: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        filter = %cli.filter,
        output = %cli.output.display(),
        "Starting OpenAlex harvest"
    );

    let mut config = Config::new(cli.mailto);
    config.name_filter = cli.filter;
    config.max_works = cli.max_works;
    config.output_path = cli.output;

    let summary = Harvester::new(config)?.run().await?;

    tracing::info!(
        institutions = summary.institutions,
        works = summary.works,
        "Harvest complete"
    );

    Ok(())
}
