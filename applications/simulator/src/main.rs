/// TrackSkip simulator - replays key and volume traces through the seek engine
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use trackskip_settings::{Settings, SettingsStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod host;
mod runner;
mod trace;

#[derive(Parser)]
#[command(name = "trackskip-sim")]
#[command(about = "Replay headset traces through the TrackSkip seek engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a trace and print a JSON report
    Run {
        /// Trace file (JSON)
        #[arg(short, long)]
        trace: PathBuf,

        /// Settings file (TOML, YAML or JSON)
        #[arg(short, long, env = "TRACKSKIP_CONFIG")]
        config: Option<PathBuf>,

        /// Override the trigger mode
        #[arg(short, long)]
        mode: Option<String>,

        /// Log a "+10s" style acknowledgement for every seek
        #[arg(long)]
        debug: bool,
    },
    /// Print the effective settings as JSON
    Config {
        /// Settings file (TOML, YAML or JSON)
        #[arg(short, long, env = "TRACKSKIP_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trackskip_sim=info,trackskip_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            trace,
            config,
            mode,
            debug,
        } => run(&trace, config.as_deref(), mode.as_deref(), debug)?,
        Commands::Config { config } => {
            let settings = Settings::load(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}

fn run(
    trace_path: &Path,
    config: Option<&Path>,
    mode: Option<&str>,
    debug: bool,
) -> anyhow::Result<()> {
    let mut settings = Settings::load(config)?;
    if let Some(mode) = mode {
        settings.set_mode_name(mode)?;
    }
    settings.debug |= debug;

    tracing::info!(mode = %settings.mode, enabled = settings.enabled, "Starting replay");

    let trace_json = std::fs::read_to_string(trace_path)
        .with_context(|| format!("reading trace {}", trace_path.display()))?;

    let store = SettingsStore::new(settings);
    let report = runner::replay(&trace_json, store)
        .with_context(|| format!("replaying {}", trace_path.display()))?;

    tracing::info!(
        seeks = report.seeks.len(),
        final_volume = report.final_volume,
        "Replay finished"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
