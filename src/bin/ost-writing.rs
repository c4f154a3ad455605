//! ost-writing CLI: extract writing-quality features from text files.
//!
//! Usage:
//!   ost-writing extract <FILES>... [--config path] [--format json|tsv]
//!   ost-writing schema [--config path]

use clap::{Parser, Subcommand, ValueEnum};
use ost_writing::{BatchRunner, ExtractorConfig, FeatureExtractor, FeatureTable};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ost-writing",
    version,
    about = "Linguistic feature engine for writing quality"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one feature row per input file
    Extract {
        /// Text files to analyse
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Print the column schema, one name per line
    Schema,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Tsv,
}

fn load_config(path: Option<&Path>) -> Result<ExtractorConfig, String> {
    ExtractorConfig::load_or_default(path).map_err(|e| format!("Failed to load config: {}", e))
}

fn build_extractor(config: &ExtractorConfig) -> Result<FeatureExtractor, String> {
    FeatureExtractor::builtin(config).map_err(|e| format!("Failed to load resources: {}", e))
}

fn cmd_schema(config: &ExtractorConfig) -> i32 {
    match build_extractor(config) {
        Ok(extractor) => {
            for column in extractor.columns() {
                println!("{}", column);
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_extract(config: &ExtractorConfig, files: &[PathBuf], format: Format) -> i32 {
    let extractor = match build_extractor(config) {
        Ok(extractor) => extractor,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let mut inputs = Vec::with_capacity(files.len());
    for path in files {
        match std::fs::read(path) {
            Ok(bytes) => inputs.push((path.display().to_string(), bytes)),
            Err(e) => {
                eprintln!("Error: cannot read '{}': {}", path.display(), e);
                return 1;
            }
        }
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to create tokio runtime: {}", e);
            return 1;
        }
    };
    let runner = BatchRunner::new(extractor).with_max_concurrency(config.max_concurrency);
    let table = rt.block_on(runner.extract_batch_with_ids(inputs));

    match render(&table, format) {
        Ok(out) => {
            print!("{}", out);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn render(table: &FeatureTable, format: Format) -> Result<String, String> {
    match format {
        Format::Tsv => Ok(table.to_tsv()),
        Format::Json => serde_json::to_string_pretty(table)
            .map(|json| json + "\n")
            .map_err(|e| format!("Failed to serialize table: {}", e)),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ost_writing=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Extract { files, format } => cmd_extract(&config, &files, format),
        Commands::Schema => cmd_schema(&config),
    };
    std::process::exit(code);
}
