//! Olympic Charts - render the Olympic athlete charts from the command line.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use olympic_charts::animation::WrapPolicy;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Athlete CSV (overrides the config file)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Medals by sport bar chart, with an optional team drill-down
    Bars {
        #[arg(long)]
        sport: Option<String>,
        /// List the athletes of a team
        #[arg(long)]
        team: Option<String>,
        /// Show the full athlete list instead of the first entries
        #[arg(long, requires = "team")]
        all: bool,
        #[arg(long, default_value = "medals.svg")]
        out: PathBuf,
    },
    /// Height x weight scatterplot for one year
    Scatter {
        #[arg(long)]
        year: Option<String>,
        #[arg(long, default_value = "scatter.svg")]
        out: PathBuf,
    },
    /// Animated team scatterplot, one SVG per drawn frame
    Animate {
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
        /// Number of ticks after the first year (default: one full cycle)
        #[arg(long)]
        ticks: Option<u64>,
        #[arg(long, default_value = "frames")]
        out_dir: PathBuf,
        /// Wait for the real tick interval between frames
        #[arg(long)]
        realtime: bool,
    },
    /// Aggregates as JSON on stdout
    Summary {
        #[arg(long)]
        sport: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Simple,
    Reset,
}

impl From<PolicyArg> for WrapPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Simple => WrapPolicy::Simple,
            PolicyArg::Reset => WrapPolicy::FadeReset,
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();
    let config = commands::resolve_config(cli.config.as_deref(), cli.data)?;

    match cli.mode {
        Mode::Bars {
            sport,
            team,
            all,
            out,
        } => commands::bars(&config, sport, team, all, &out),
        Mode::Scatter { year, out } => commands::scatter(&config, year, &out),
        Mode::Animate {
            policy,
            ticks,
            out_dir,
            realtime,
        } => commands::animate(config, policy.map(Into::into), ticks, &out_dir, realtime),
        Mode::Summary { sport } => commands::summary(&config, sport),
    }
}
