//! Pricer CLI - option prices and price surfaces from the command line
//!
//! # Commands
//!
//! - `pricer price --model heston -p S=100 -p K=100 ...` - Price one call/put pair
//! - `pricer sweep --model bs -p K=100 ... --x S:50:150:11 --y sigma:0.05:1:11` - Price surface
//! - `pricer models` - List models and their parameters
//!
//! Engine defaults come from `pricer.toml` and `PRICER_*` environment
//! variables; see [`config`].

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pricer_pricing::{AxisSpec, Dispatcher, ModelTag, SurfaceSweeper};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod args;
mod commands;
mod config;
mod error;

use commands::OutputFormat;
use config::{CliConfig, LogLevel};
pub use error::{CliError, Result};

/// Option pricing across closed-form, lattice and Monte Carlo models
#[derive(Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "pricer.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a call/put pair
    Price {
        /// Model tag or alias (e.g., black_scholes, bs, heston)
        #[arg(short, long)]
        model: String,

        /// Model parameter as name=value (repeatable)
        #[arg(short, long = "param", value_parser = args::parse_assignment)]
        param: Vec<(String, f64)>,

        /// Output format (json, csv, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Price a surface over two parameters
    Sweep {
        /// Model tag or alias
        #[arg(short, long)]
        model: String,

        /// Base parameter as name=value (repeatable)
        #[arg(short, long = "param", value_parser = args::parse_assignment)]
        param: Vec<(String, f64)>,

        /// Row axis as name:low:high:count
        #[arg(long, value_parser = args::parse_axis)]
        x: AxisSpec,

        /// Column axis as name:low:high:count
        #[arg(long, value_parser = args::parse_axis)]
        y: AxisSpec,

        /// Output format (json, csv, table)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List models with their aliases and parameters
    Models,
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.config, cli.verbose)?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Price {
            model,
            param,
            format,
        } => {
            let model: ModelTag = model.parse()?;
            let format: OutputFormat = format.parse()?;
            let dispatcher = Dispatcher::new(config.engine);
            commands::price::run(&dispatcher, model, &args::collect_parameters(&param), format)
        }
        Commands::Sweep {
            model,
            param,
            x,
            y,
            format,
            output,
        } => {
            let model: ModelTag = model.parse()?;
            let format: OutputFormat = format.parse()?;
            let sweeper = SurfaceSweeper::new(Dispatcher::new(config.engine))?;
            commands::sweep::run(
                &sweeper,
                model,
                &args::collect_parameters(&param),
                &x,
                &y,
                format,
                output.as_deref(),
            )
        }
        Commands::Models => {
            commands::models::run();
            Ok(())
        }
    }
}

/// Loads configuration and starts logging; `--verbose` forces debug.
fn load_config(path: &Path, verbose: bool) -> Result<CliConfig> {
    match CliConfig::load(path) {
        Ok(config) => {
            init_tracing(if verbose {
                LogLevel::Debug
            } else {
                config.log_level
            });
            Ok(config)
        }
        Err(err) => {
            init_tracing(if verbose { LogLevel::Debug } else { LogLevel::Info });
            Err(err)
        }
    }
}
