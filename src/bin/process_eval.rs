// Process evaluation CLI
//
// Purpose: Score one crop/stage observation and print the result as JSON
// Usage: process_eval rice vegetative 40 45 45 25 80 6.5 200 --threshold 0.4

use anyhow::{Context, Result};
use clap::Parser;
use process_eval_rust::config::{DEFAULT_MODEL_PATH, DEFAULT_RULES_PATH};
use process_eval_rust::{EvalConfig, Observation, ProcessEvaluator, DEFAULT_THRESHOLD};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "process_eval")]
#[command(about = "Evaluate crop/stage suitability and advise on out-of-range readings", long_about = None)]
#[command(version, allow_negative_numbers = true)]
struct Cli {
    /// Crop identifier (e.g. rice)
    crop: String,

    /// Growth stage identifier (e.g. vegetative)
    stage: String,

    /// Soil nitrogen
    #[arg(value_name = "N")]
    n: f64,

    /// Soil phosphorus
    #[arg(value_name = "P")]
    p: f64,

    /// Soil potassium
    #[arg(value_name = "K")]
    k: f64,

    /// Temperature (°C)
    temperature: f64,

    /// Relative humidity (%)
    humidity: f64,

    /// Soil pH
    ph: f64,

    /// Rainfall (mm)
    rainfall: f64,

    /// Stage guide JSON with per-crop, per-stage ideal ranges
    #[arg(long, env = "PROCESS_EVAL_RULES", default_value = DEFAULT_RULES_PATH)]
    rules: PathBuf,

    /// Estimator artifact JSON
    #[arg(long, env = "PROCESS_EVAL_MODEL", default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// Probability at or above which the verdict is "suitable"
    #[arg(long, env = "PROCESS_EVAL_THRESHOLD", default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the result record
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "process_eval_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let observation = Observation::builder(&cli.crop, &cli.stage)
        .values([
            cli.n,
            cli.p,
            cli.k,
            cli.temperature,
            cli.humidity,
            cli.ph,
            cli.rainfall,
        ])
        .build()
        .context("Invalid observation")?;

    let config = EvalConfig::default()
        .with_threshold(cli.threshold)
        .with_rules_path(&cli.rules)
        .with_model_path(&cli.model);

    tracing::debug!("Configuration: {:?}", config);

    let evaluator = ProcessEvaluator::from_config(&config)
        .context("Failed to load evaluation artifacts")?;

    let result = evaluator
        .evaluate(&observation)
        .with_context(|| format!("Failed to score {}/{}", observation.crop(), observation.stage()))?;

    let output = if cli.pretty {
        result.to_json_pretty()?
    } else {
        result.to_json()?
    };
    println!("{}", output);

    Ok(())
}
