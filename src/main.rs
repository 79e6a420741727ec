use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{error, info};

use oversold::app::App;
use oversold::config::Config;
use oversold::error::Result;

/// Stock watchlist alerting with RSI-based triggers and multi-channel dispatch
#[derive(Parser, Debug)]
#[command(name = "oversold")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: std::path::PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Poll the watchlist on an interval (foreground)
    Run,
    /// Run a single evaluation pass and exit
    Tick,
    /// Manually fire an alert for one watched symbol
    Fire {
        symbol: String,
        /// Recipient override for this fire only
        #[arg(long)]
        to: Option<String>,
    },
    /// Print the audit log
    Log,
}

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
    config.logging.init();

    if let Err(e) = run_command(cli.command, &config).await {
        error!(error = %e, "Fatal error");
        std::process::exit(1);
    }
}

async fn run_command(command: Commands, config: &Config) -> Result<()> {
    let app = App::build(config)?;
    match command {
        Commands::Run => {
            info!("oversold starting");
            tokio::select! {
                result = app.run() => result?,
                _ = signal::ctrl_c() => info!("Shutdown signal received"),
            }
            info!("oversold stopped");
        }
        Commands::Tick => {
            let reports = app.engine.tick().await;
            if reports.is_empty() {
                println!("No alerts fired.");
            }
            for report in &reports {
                println!(
                    "{}: {} delivered, {} failed{}",
                    report.symbol,
                    report.delivered(),
                    report.failed(),
                    if report.logged() {
                        ""
                    } else {
                        " (audit append failed)"
                    }
                );
            }
        }
        Commands::Fire { symbol, to } => {
            let report = app.engine.fire_manual(&symbol, to.as_deref()).await?;
            println!(
                "{}: {} delivered, {} failed",
                report.symbol,
                report.delivered(),
                report.failed()
            );
        }
        Commands::Log => {
            for record in app.engine.audit_records().await? {
                println!(
                    "{}  {}  {:.2}  {}  {}",
                    record.at.format("%Y-%m-%d %H:%M:%S"),
                    record.symbol,
                    record.price,
                    record.recipient,
                    record.trigger
                );
            }
        }
    }
    Ok(())
}
