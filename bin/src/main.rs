//! macrolens CLI - macro indicator dashboards from public data sources.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use macrolens_lib::prelude::*;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod display;

use commands::Context;

#[derive(Parser)]
#[command(name = "macrolens")]
#[command(
    about = "Macro indicator dashboards from FRED, markets, World Bank, TIC and GDELT",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Per-request timeout in seconds
    #[arg(long, env = "MACROLENS_TIMEOUT", default_value = "30", global = true)]
    timeout: u64,

    /// Maximum concurrent upstream requests
    #[arg(long, env = "MACROLENS_CONCURRENCY", default_value = "1", global = true)]
    concurrency: usize,

    /// User agent sent to every provider
    #[arg(long, env = "MACROLENS_USER_AGENT", global = true)]
    user_agent: Option<String>,

    /// Look-back period (e.g. 6mo, 1y, 5y, max). Defaults per dashboard.
    #[arg(long, global = true)]
    period: Option<Period>,

    /// What to do when a metric cannot be computed (abort, skip). Defaults per dashboard.
    #[arg(long, global = true)]
    policy: Option<DerivePolicy>,
}

/// Table output options shared by the dashboard commands.
#[derive(Args)]
struct OutputArgs {
    /// Write the full table in this format (csv, json, ndjson, parquet)
    /// instead of printing the latest values
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Output file path. Defaults to stdout.
    #[arg(short, long, requires = "format")]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fiscal dominance: revenue against interest and mandatory spending
    Fiscal(OutputArgs),

    /// Energy-value of money: barrels of oil per 10-year bond
    Energy(OutputArgs),

    /// De-dollarization: dollar index, gold, bitcoin and foreign holdings
    Dedollar(OutputArgs),

    /// Physical economy: energy, copper, food and crude production
    Physical(OutputArgs),

    /// Geopolitical realignment: trade, onshoring, GDP and news
    Geopolitics(OutputArgs),

    /// Liquidity: Fed balance sheet year-over-year
    Liquidity(OutputArgs),

    /// Show Treasury holdings of China and Japan from the TIC report
    Tic,

    /// Show latest total reserves of a country
    Reserves {
        /// ISO3 country code
        #[arg(short, long, default_value = "CHN")]
        country: String,
    },

    /// Show recent news articles on tariffs and protectionism
    News {
        /// Articles shown per topic
        #[arg(short, long, default_value = "5")]
        sample: usize,
    },

    /// List known series
    List {
        /// Filter by source (fred, market, world_bank, tic, gdelt)
        #[arg(short, long)]
        source: Option<String>,

        /// Search pattern
        #[arg(long)]
        search: Option<String>,
    },

    /// Show series details
    Info {
        /// Series identifier
        id: String,
    },
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the verbosity flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("macrolens={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let settings = RunSettings {
        concurrency: cli.concurrency,
        policy: cli.policy,
        period: cli.period,
        timeout: Duration::from_secs(cli.timeout),
    };

    let ctx = || Context::new(settings, cli.user_agent.clone(), cli.quiet);

    match command {
        Commands::Fiscal(out) => run(&ctx()?, DashboardKind::Fiscal, out).await,
        Commands::Energy(out) => run(&ctx()?, DashboardKind::Energy, out).await,
        Commands::Dedollar(out) => run(&ctx()?, DashboardKind::Dedollar, out).await,
        Commands::Physical(out) => run(&ctx()?, DashboardKind::Physical, out).await,
        Commands::Geopolitics(out) => run(&ctx()?, DashboardKind::Geopolitics, out).await,
        Commands::Liquidity(out) => run(&ctx()?, DashboardKind::Liquidity, out).await,
        Commands::Tic => commands::tic::show_holdings(&ctx()?).await,
        Commands::Reserves { country } => {
            commands::reserves::show_reserves(&ctx()?, &country).await
        }
        Commands::News { sample } => commands::news::show_news(&ctx()?, sample).await,
        Commands::List { source, search } => {
            commands::list::list_series(source.as_deref(), search.as_deref())
        }
        Commands::Info { id } => commands::info::show_info(&id),
    }
}

async fn run(ctx: &Context, kind: DashboardKind, out: OutputArgs) -> Result<()> {
    commands::dashboard::run_dashboard(ctx, kind, out.format, out.output).await
}
