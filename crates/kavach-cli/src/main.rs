use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use kavach_core::{DetectionPolicy, Pipeline, RecordClassifier, DEFAULT_OUTPUT_FILE};

/// Kavach: detect and redact PII in CSV rows carrying embedded JSON records
#[derive(Parser, Debug)]
#[command(name = "kavach", version, about, long_about = None)]
struct Cli {
    /// Input CSV with `record_id` and `Data_json` columns
    input: PathBuf,

    /// Where to write the redacted CSV
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// JSON file overriding detection constants (aliases, handles, threshold, ...)
    #[arg(short, long)]
    policy: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("kavach=debug,kavach_core=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("kavach=info,kavach_core=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_policy(path: Option<&Path>) -> Result<DetectionPolicy> {
    match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("reading policy file {}", p.display()))?;
            DetectionPolicy::from_json(&text)
                .with_context(|| format!("loading policy file {}", p.display()))
        }
        None => Ok(DetectionPolicy::default()),
    }
}

/// One-line rendering of an error and its context chain
fn report(e: &anyhow::Error) -> String {
    format!("{e:#}")
}

fn run(cli: Cli) -> Result<()> {
    let policy = load_policy(cli.policy.as_deref())?;
    let pipeline = Pipeline::new(RecordClassifier::new(policy));

    let summary = pipeline
        .run_files(&cli.input, &cli.output)
        .with_context(|| format!("redacting {}", cli.input.display()))?;

    let written = cli.output.canonicalize().unwrap_or(cli.output);
    println!("Written: {}", written.display());
    println!(
        "{} rows, {} with PII ({} malformed, {} not valid UTF-8)",
        summary.rows, summary.pii_rows, summary.malformed_rows, summary.lossy_rows
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {}", report(&e));
        std::process::exit(1);
    }
}
