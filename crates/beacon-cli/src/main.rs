//! BloodBeacon scanner CLI.

use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use beacon_cli::config::Config;
use beacon_cli::form::{parse_or, FormInput, DEFAULT_HEIGHT_CM, DEFAULT_WEIGHT_KG};
use beacon_cli::report::{render_bmi, render_metrics, render_report};
use beacon_cli::ModelStack;
use beacon_common::{compute_bmi, BeaconError, DisplayProfile, ScoringStrategy};
use beacon_scorer::scan;

#[derive(Parser)]
#[command(name = "beacon", version, about = "Biomarker-based diabetes risk scanner")]
struct Cli {
    /// Path to beacon.toml (defaults to $BEACON_CONFIG or ./beacon.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute BMI from weight and height
    Bmi {
        #[arg(long)]
        weight: Option<String>,
        #[arg(long)]
        height: Option<String>,
    },
    /// Score a patient and classify risk
    Scan(ScanArgs),
}

#[derive(Args)]
struct ScanArgs {
    #[arg(long)]
    age: Option<String>,
    #[arg(long)]
    glucose: Option<String>,
    #[arg(long)]
    hba1c: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    hypertension: bool,
    #[arg(long)]
    heart_disease: bool,
    /// Weight in kg for the BMI calculator
    #[arg(long)]
    weight: Option<String>,
    /// Height in cm for the BMI calculator
    #[arg(long)]
    height: Option<String>,
    /// Pre-computed BMI
    #[arg(long)]
    bmi: Option<String>,
    #[arg(long)]
    pregnancies: Option<String>,
    #[arg(long)]
    blood_pressure: Option<String>,
    #[arg(long)]
    skin_thickness: Option<String>,
    #[arg(long)]
    insulin: Option<String>,
    #[arg(long)]
    dpf: Option<String>,
    /// additive | findrisc | mean_percentage
    #[arg(long)]
    strategy: Option<ScoringStrategy>,
    /// clinical | pima
    #[arg(long)]
    profile: Option<DisplayProfile>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl From<ScanArgs> for FormInput {
    fn from(args: ScanArgs) -> Self {
        Self {
            age: args.age,
            glucose: args.glucose,
            hba1c: args.hba1c,
            gender: args.gender,
            hypertension: args.hypertension,
            heart_disease: args.heart_disease,
            weight_kg: args.weight,
            height_cm: args.height,
            bmi: args.bmi,
            pregnancies: args.pregnancies,
            blood_pressure: args.blood_pressure,
            skin_thickness: args.skin_thickness,
            insulin: args.insulin,
            dpf: args.dpf,
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    // Initialise structured logging
    let fallback = if cli.verbose { "beacon=debug,info".to_string() } else { config.logging.filter.clone() };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with_writer(std::io::stderr)
        .init();

    info!("BloodBeacon {}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Bmi { weight, height } => {
            let weight = config.scoring.ranges.weight_kg.clamp(parse_or(weight.as_deref(), DEFAULT_WEIGHT_KG));
            let height = config.scoring.ranges.height_cm.clamp(parse_or(height.as_deref(), DEFAULT_HEIGHT_CM));
            let bmi = compute_bmi(weight, height)?;
            println!("{}", render_bmi(bmi));
        }
        Command::Scan(args) => {
            if let Some(strategy) = args.strategy {
                config.scoring.strategy = strategy;
            }
            if let Some(profile) = args.profile {
                config.scoring.profile = profile;
            }
            let json = args.json;

            let reading = FormInput::from(args).into_reading(&config.scoring)?;
            if !reading.is_scan_ready() {
                warn!("Scan requested before BMI was computed");
                eprintln!("{}", render_metrics(&reading));
                return Err(BeaconError::BmiMissing.into());
            }

            let models = ModelStack::load(&config.scoring)?;
            let report = scan(&reading, &config.scoring, &*models.scaler, models.classifier.as_deref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_report(&report));
            }
        }
    }

    Ok(())
}
