mod app;
mod cli;
mod commands;
mod keymap;
mod logger;
mod tui;
mod views;

use cli::Commands;
use redesc_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::parse_args();

    let log_file = logger::init();
    log::info!("Starting redesc, logging to {}", log_file.display());

    let config = AppConfig::load();

    let result = match args.command {
        Commands::Substitute(args) => commands::substitute::run(&config, args).await,
        Commands::Authorize => commands::authorize::run().await,
        Commands::BackfillTags(args) => commands::backfill_tags::run(&config, args).await,
    };

    if let Err(err) = &result {
        log::error!("{:#}", err);
    }

    log::info!("Exiting redesc");
    result
}
