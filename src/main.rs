use clap::Parser;
use marketlens::app::App;
use marketlens::cli::{Cli, Commands};
use marketlens::config::Config;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!("marketlens starting");

    let command = cli.command.unwrap_or(Commands::Run);

    tokio::select! {
        result = App::run(config, command) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("marketlens stopped");
}
