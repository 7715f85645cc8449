mod commands;
mod output;
mod sinks;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dce")]
#[command(version, about = "Data Contracts enforcement CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log filter directive (e.g. "warn", "contracts_enforcer=debug"); overrides --verbose
    #[arg(long, global = true, env = "DCE_LOG")]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enforce a contract against a compatibility policy (CI/CD gate)
    ///
    /// Exits 0 when the pipeline may continue, 2 when deployment is blocked,
    /// and 1 when the contract or policy could not be loaded.
    Enforce {
        /// Path to the contract file (JSON)
        contract: String,

        /// Path to the compatibility policy file (JSON)
        #[arg(short, long, env = "DCE_POLICY")]
        policy: String,

        /// Path to the baseline contract holding the expected schema
        #[arg(short, long, env = "DCE_BASELINE")]
        baseline: Option<String>,

        /// Directory to write the compatibility report to
        #[arg(short, long, env = "DCE_REPORT_DIR")]
        report_dir: Option<String>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Treat patch version differences as upgrades/downgrades
        #[arg(long)]
        patch_sensitive: bool,
    },

    /// Check that a contract loads and its version is well-formed
    Check {
        /// Path to the contract file (JSON)
        contract: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show field drift between a baseline contract and a contract
    Diff {
        /// Path to the baseline contract (expected schema)
        baseline: String,

        /// Path to the contract under evaluation
        contract: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_level.as_deref())?;

    match cli.command {
        Commands::Enforce {
            contract,
            policy,
            baseline,
            report_dir,
            format,
            patch_sensitive,
        } => commands::enforce::execute(commands::enforce::EnforceArgs {
            contract: &contract,
            policy: &policy,
            baseline: baseline.as_deref(),
            report_dir: report_dir.as_deref(),
            format: &format,
            patch_sensitive,
        }),

        Commands::Check { contract, format } => commands::check::execute(&contract, &format),

        Commands::Diff {
            baseline,
            contract,
            format,
        } => commands::diff::execute(&baseline, &contract, &format),
    }
}

/// Logs go to stderr so JSON reports on stdout stay machine-readable.
fn init_tracing(verbose: bool, directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("Invalid log level: {directive}"))?,
        None => {
            let level = if verbose {
                LevelFilter::DEBUG
            } else {
                LevelFilter::INFO
            };
            EnvFilter::builder()
                .with_default_directive(level.into())
                .parse_lossy("")
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .init();

    Ok(())
}
