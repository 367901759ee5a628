use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "lockwatch",
    about = "BitLocker recovery key escrow report for Intune-managed devices",
    version
)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "lockwatch.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Where to write the file (defaults to --config)
        #[arg(long)]
        output: Option<String>,
    },
    /// Fetch devices and recovery keys and write the report
    Report {
        /// Report destination; `.xlsx` for a workbook, otherwise a CSV directory
        #[arg(long)]
        output: Option<String>,
        /// Lowest OS version counted as Windows 11
        #[arg(long)]
        windows11_min_version: Option<String>,
    },
    /// Verify Graph credentials and permissions
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { output } => {
            let path = output.unwrap_or_else(|| cli.config.clone());
            commands::init::run(&path)?;
        }
        Commands::Report {
            output,
            windows11_min_version,
        } => {
            let overrides = commands::report::ReportOverrides {
                output,
                windows11_min_version,
            };
            commands::report::run(&cli.config, overrides).await?;
        }
        Commands::Check => {
            commands::check::run(&cli.config).await?;
        }
    }

    Ok(())
}
