use anyhow::Result;
use clap::{Parser, Subcommand};
use easi_flare::config::{Config, DEFAULT_CONFIG_FILE, DEFAULT_LOG_FILTER};
use easi_flare::features::{FeatureSchema, FeatureVector};
use easi_flare::service::PredictionService;
use easi_flare::ui::cli::drivers::InquireDriver;
use easi_flare::ui::cli::{predict_once, run_session, write_schema};
use std::io::{IsTerminal, stdout};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "easi-flare",
    about = "Predict a future EASI score and flare-up risk from blood markers",
    long_about = "Loads a pre-fitted EASI scorer and flare-up classifier and applies them to \
                 eosinophil-derived blood markers entered as raw values."
)]
struct Cli {
    /// JSON config file; defaults apply when it does not exist
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Marker panel: two-marker (ERC, ELR) or five-marker (age, ERC, NLR, BLR, ELR)
    #[arg(long, global = true)]
    panel: Option<FeatureSchema>,

    /// Path to the EASI score model artifact
    #[arg(long, global = true)]
    scorer: Option<PathBuf>,

    /// Path to the flare-up classifier artifact
    #[arg(long, global = true)]
    classifier: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the marker form interactively (default)
    Interactive,

    /// Predict once from comma separated values, e.g. --values 2.5,0.3
    Predict {
        #[arg(long, allow_hyphen_values = true)]
        values: FeatureVector,

        /// Print the result as JSON with the score at full precision
        #[arg(long)]
        json: bool,
    },

    /// Show the fields, order and bounds of the configured panel
    Schema,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(&cli.config)?.with_overrides(
        cli.panel,
        cli.scorer,
        cli.classifier,
    );

    let mut out = stdout().lock();
    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Schema => write_schema(config.panel, &mut out),
        Commands::Interactive => {
            let service = PredictionService::from_config(&config);
            let color = stdout().is_terminal();
            let made = run_session(&InquireDriver, &service, &mut out, color)?;
            log::info!("Session finished after {made} prediction(s)");
            Ok(())
        }
        Commands::Predict { values, json } => {
            let service = PredictionService::from_config(&config);
            predict_once(&service, values, json, &mut out, stdout().is_terminal())?;
            Ok(())
        }
    }
}
