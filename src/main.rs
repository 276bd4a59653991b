//! Gavel CLI
//!
//! Terminal front end for the auction marketplace:
//! - Browse and filter auctions
//! - Show an auction with bids and comments
//! - Place bids and comment
//! - Manage the watchlist

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;

use gavel::config::{generate_default_config, Config};
use gavel::{
    ApiClient, AuctionDetailsView, AuctionFilter, DashboardView, LandingView, StatusFilter,
    ViewContext, WatchlistView,
};

#[derive(Parser)]
#[command(name = "gavel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse, bid on and watch marketplace auctions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Auction API base URL, overrides config
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the landing page
    Home,

    /// List auctions
    Auctions {
        /// Title search
        #[arg(short, long, default_value = "")]
        search: String,
        /// Status (all, active, ended)
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        /// Minimum current bid
        #[arg(long, default_value = "")]
        min_bid: String,
        /// Maximum current bid
        #[arg(long, default_value = "")]
        max_bid: String,
    },

    /// Show an auction with its bids and comments
    Show {
        /// Auction id
        id: String,
    },

    /// Place a bid
    Bid {
        /// Auction id
        id: String,
        /// Amount, must exceed the current bid
        amount: String,
    },

    /// Comment on an auction
    Comment {
        /// Auction id
        id: String,
        /// Comment text
        text: String,
    },

    /// Add an auction to your watchlist
    Watch {
        /// Auction id
        id: String,
    },

    /// Show your watchlist
    Watchlist,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    gavel::logging::init(&config.logging).context("Failed to initialize logging")?;
    tracing::debug!(api = %config.api.base_url, "Gavel v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Home => {
            emit(cli.format, &LandingView::new().screen())?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }

        Commands::Auctions {
            search,
            status,
            min_bid,
            max_bid,
        } => {
            let filter = AuctionFilter {
                search,
                status,
                min_bid,
                max_bid,
            };
            let view = DashboardView::with_filter(context(&config)?, filter);
            view.load().await;
            emit(cli.format, &view.screen().await)?;
        }

        Commands::Show { id } => {
            let view = AuctionDetailsView::new(context(&config)?, id).await;
            view.load().await;
            emit(cli.format, &view.screen().await)?;
        }

        Commands::Bid { id, amount } => {
            let mut view = AuctionDetailsView::new(context(&config)?, id).await;
            view.load().await;
            view.set_bid_input(amount);

            if let Err(e) = view.place_bid().await {
                eprintln!("Bid not placed: {}", e);
                std::process::exit(1);
            }
            emit(cli.format, &view.screen().await)?;
        }

        Commands::Comment { id, text } => {
            let mut view = AuctionDetailsView::new(context(&config)?, id).await;
            view.load().await;
            view.set_comment_input(text);

            if let Err(e) = view.add_comment().await {
                eprintln!("Comment not added: {}", e);
                std::process::exit(1);
            }
            emit(cli.format, &view.screen().await)?;
        }

        Commands::Watch { id } => {
            let view = DashboardView::new(context(&config)?);
            // Failures are logged, not reported.
            view.add_to_watchlist(id.clone()).await?;
            println!("Watch request sent for auction {}", id);
        }

        Commands::Watchlist => {
            let view = WatchlistView::new(context(&config)?);
            view.load().await;
            emit(cli.format, &view.screen().await)?;
        }
    }

    Ok(())
}

fn context(config: &Config) -> anyhow::Result<ViewContext> {
    let client = ApiClient::new(&config.api)
        .with_context(|| format!("Invalid API URL: {}", config.api.base_url))?;
    Ok(ViewContext::new(Arc::new(client), config))
}

fn emit<S>(format: OutputFormat, screen: &S) -> anyhow::Result<()>
where
    S: Serialize + Display,
{
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(screen)?),
        OutputFormat::Text => print!("{}", screen),
    }
    Ok(())
}
