//! sn3: inspect SN3 (IDX) files and the datasets built from them.
//!
//! Run with:
//!   cargo run --bin sn3 -- inspect data/mnist/train-images-idx3-ubyte
//!   cargo run --bin sn3 -- summary data/mnist --test --out t10k.json
//!   cargo run --bin sn3 -- export-png data/mnist --index 7 --out seven.png

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use ferrite_sn3::dataset::{Dataset, DatasetConfig, DatasetSummary, Split};
use ferrite_sn3::export::save_grayscale_png;
use ferrite_sn3::format::read_sn3_header;

#[derive(Parser, Debug)]
#[command(name = "sn3", version, about = "Inspect SN3 tensor files and digit datasets")]
struct Cli {
    /// Log decoder details.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the header of one SN3 file as JSON.
    Inspect { file: PathBuf },

    /// Load a dataset split and print its summary as JSON.
    Summary {
        dir: PathBuf,
        /// Use the t10k files instead of the train files.
        #[arg(long)]
        test: bool,
        /// Write the summary to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write one image sample as a grayscale PNG.
    ExportPng {
        dir: PathBuf,
        #[arg(long)]
        index: usize,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        test: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("sn3: a tracing subscriber was already installed");
    }
}

fn load(dir: PathBuf, test: bool) -> Result<Dataset> {
    let split = if test { Split::Test } else { Split::Train };
    let config = DatasetConfig::new(dir, split);
    Dataset::from_config(&config)
        .with_context(|| format!("loading {} split from {}", split, config.root().display()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Inspect { file } => {
            let header = read_sn3_header(&file)?;
            println!("{}", serde_json::to_string_pretty(&header)?);
        }
        Command::Summary { dir, test, out } => {
            let summary = DatasetSummary::from_dataset(&load(dir, test)?);
            match out {
                Some(path) => {
                    summary
                        .save_json(&path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(out = %path.display(), samples = summary.samples, "wrote summary");
                }
                None => println!("{}", summary.to_json()?),
            }
        }
        Command::ExportPng { dir, index, out, test } => {
            let ds = load(dir, test)?;
            let (image, label) = ds.get(index)?;
            save_grayscale_png(&image, &out)?;
            info!(index, label = ?label.scalar_i64(), out = %out.display(), "wrote sample");
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
