use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "beer-pricing")]
#[command(about = "Beer catalog with currency-converted box prices")]
pub struct Cli {
    #[arg(long, short, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Overrides database.url (and DATABASE_URL)")]
    pub database_url: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every beer in the catalog
    List,
    /// Add a beer to the catalog
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        brewery: String,
        #[arg(long, default_value = "")]
        country: String,
        #[arg(long, allow_negative_numbers = true)]
        price: f64,
        #[arg(long)]
        currency: String,
    },
    /// Show a single beer
    Get { id: i64 },
    /// Price a box of beers, optionally in another currency
    BoxPrice {
        id: i64,
        #[arg(long)]
        currency: Option<String>,
        /// Falls back to 6 when missing or not a positive integer
        #[arg(long)]
        quantity: Option<String>,
    },
}
