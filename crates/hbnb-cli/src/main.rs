use anyhow::Context;
use clap::Parser;
use hbnb_config::HbnbConfig;
use hbnb_storage::Storage;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("hbnb error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;
    let flags = cli.global_flags();

    let mut config = HbnbConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(backend) = cli.backend {
        config.storage.backend = backend.into();
    }

    let mut storage = Storage::open(&config.storage)
        .await
        .context("failed to open storage")?;

    let result = commands::dispatch::dispatch(cli.command, &mut storage).await;
    storage.close().await?;
    output::output(&result?, flags.format)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("HBNB_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
