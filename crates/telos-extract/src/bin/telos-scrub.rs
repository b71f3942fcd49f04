//! CLI for scrubbing PII from a document
//!
//! Usage:
//!   telos-scrub resume.pdf
//!   telos-scrub --json --config telos.toml notes.docx

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use telos_extract::{Pipeline, PipelineConfig};
use tracing::debug;

/// Exit status for uploads the ingestion checks reject
const EXIT_REJECTED: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "telos-scrub")]
#[command(about = "Extract text from a PDF, DOCX or text file and remove PII")]
struct Args {
    /// Document to scrub
    file: PathBuf,

    /// Pipeline configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Override the upload size ceiling, in bytes
    #[arg(long)]
    max_bytes: Option<u64>,

    /// Override the minimum extracted length, in characters
    #[arg(long)]
    min_chars: Option<usize>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match PipelineConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => PipelineConfig::default(),
    };
    if let Some(max_bytes) = args.max_bytes {
        config.ingest.max_bytes = max_bytes;
    }
    if let Some(min_chars) = args.min_chars {
        config.ingest.min_content_chars = min_chars;
    }
    debug!(?config, "Loaded configuration");

    let pipeline = Pipeline::new(config);
    let scrubbed = match pipeline.process_path(&args.file).await {
        Ok(scrubbed) => scrubbed,
        Err(e) => {
            debug!(code = e.code(), error = %e, "Upload rejected");
            eprintln!("{}", e.user_message());
            return ExitCode::from(EXIT_REJECTED);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&scrubbed) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", scrubbed.summary);
        println!();
        println!("{}", scrubbed.cleaned);
    }

    ExitCode::SUCCESS
}
