//! Command-line interface definitions.

pub mod check;
pub mod menu;
pub mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Marketlens - cross-store commerce reporting.
#[derive(Parser, Debug)]
#[command(name = "marketlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive report menu (the default)
    Run,

    /// Verify connectivity to all three stores
    Check,

    /// Print the valuated active-carts report
    Carts,

    /// Rank products by distinct buyers in the purchase graph
    TopProducts(TopProductsArgs),
}

#[derive(Args, Debug)]
pub struct TopProductsArgs {
    /// Maximum number of rows (defaults to the configured report limit)
    #[arg(long)]
    pub limit: Option<i64>,
}
