mod app;
mod cli;
mod loader;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{AppError, Cli};
use llm_pricing::Config;

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn try_main(cli: Cli) -> Result<(), AppError> {
    let config = Config::load(cli.config.as_deref())?;
    let cli = cli.with_config(&config);
    init_tracing(cli.debug);
    if let Some(path) = &config.source {
        tracing::debug!(
            path = %path.display(),
            models = config.models.len(),
            "using config file"
        );
    }

    let table = config.pricing_table()?;
    app::run(&cli, &table)
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = try_main(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
