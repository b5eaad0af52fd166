use clap::Parser;
use env_run::{logging, Cli, Config, EnvRun, HELP_TEXT};
use tracing::error;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = Config::from_env();
    logging::init(cli.debug, config.log_filter.as_deref());

    if cli.needs_help() {
        println!("{HELP_TEXT}");
        return Ok(());
    }

    if let Err(e) = EnvRun::new(cli.into_options(), config).run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
