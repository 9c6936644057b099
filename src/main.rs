use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use simplify_align::{load_corpus, prepare_dataset, Config, CorpusStats, PairOutcome};

#[derive(Parser)]
#[command(name = "simplify", about = "Sentence simplification corpus preparation")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Align .normal/.simple pairs and write one CSV per pair
    Prepare {
        /// Directory containing the .normal and .simple files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory the CSV tables are written to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarise a directory of prepared CSV tables
    Stats {
        /// Directory containing prepared CSV tables
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load_or_default(cli.config.as_deref())
        .with_context(|| match &cli.config {
            Some(path) => format!("loading config {}", path.display()),
            None => "building default config".to_string(),
        })?;

    match cli.command {
        Commands::Prepare { input, output } => {
            if let Some(input) = input {
                config.prepare.input_dir = input;
            }
            if let Some(output) = output {
                config.prepare.output_dir = output;
            }
            config.prepare.validate()?;

            let report = prepare_dataset(&config.prepare).with_context(|| {
                format!("preparing dataset from {}", config.prepare.input_dir.display())
            })?;

            for entry in &report.pairs {
                match &entry.outcome {
                    PairOutcome::Written { output, records } => {
                        println!("{}: {} records -> {}", entry.pair.base_name, records, output.display());
                    }
                    PairOutcome::Skipped(e) => println!("{}: skipped ({e})", entry.pair.base_name),
                    PairOutcome::Failed(e) => println!("{}: failed ({e})", entry.pair.base_name),
                }
            }
            println!(
                "Done: {} written, {} skipped, {} failed, {} records total",
                report.written(),
                report.skipped(),
                report.failed(),
                report.total_records()
            );
        }
        Commands::Stats { input } => {
            let dir = input.unwrap_or(config.prepare.output_dir);
            let records = load_corpus(&dir)
                .with_context(|| format!("loading corpus from {}", dir.display()))?;
            let stats = CorpusStats::from_records(&records);

            println!("Records: {}", stats.records);
            println!("Mean words (original): {:.2}", stats.mean_original_words);
            println!("Mean words (simplified): {:.2}", stats.mean_simplified_words);
        }
    }

    Ok(())
}
