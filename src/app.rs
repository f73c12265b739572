//! Application orchestration: connect, verify, dispatch, shut down.

use tracing::info;

use crate::cli::{check, menu, output, Commands};
use crate::config::Config;
use crate::error::Result;
use crate::report::{carts, connections};
use crate::store::Stores;

pub struct App;

impl App {
    pub async fn run(config: Config, command: Commands) -> Result<()> {
        // `check` manages its own short-lived connections so it can report
        // per-store status instead of failing on the first one.
        if let Commands::Check = command {
            return check::run(&config).await;
        }

        let stores = Stores::connect(&config).await?;
        stores.verify().await?;
        info!("all store connections verified");

        let result = Self::dispatch(&stores, &config, command).await;
        stores.shutdown().await;
        result
    }

    async fn dispatch(stores: &Stores, config: &Config, command: Commands) -> Result<()> {
        match command {
            Commands::Run => menu::run(stores, config).await,
            Commands::Carts => {
                let text = carts::run(&stores.carts, &stores.catalog).await?;
                output::note(&text);
                Ok(())
            }
            Commands::TopProducts(args) => {
                let limit = args.limit.unwrap_or(config.report.top_products_limit);
                let text = connections::run(&stores.graph, limit).await?;
                output::note(&text);
                Ok(())
            }
            Commands::Check => unreachable!("handled before connecting"),
        }
    }
}
