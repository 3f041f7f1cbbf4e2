//! `clustermatch` — reconcile two clustering runs from JSON partition files.
//!
//! Thin invoker around `clustermatch-recon`; the engine itself stays pure
//! and IO-free.

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use clustermatch_recon::{match_partitions_json, MatchOptions, ReconError};

use exit_codes::{
    EXIT_ERROR, EXIT_INVALID_INPUT, EXIT_INVALID_OPTIONS, EXIT_IO, EXIT_NON_CONVERGENCE,
    EXIT_SUCCESS,
};

#[derive(Parser)]
#[command(name = "clustermatch")]
#[command(about = "Match clusters between two runs: pairs, additions, removals")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a before/after pair of JSON partition files
    #[command(after_help = "\
Examples:
  clustermatch run before.json after.json
  clustermatch run before.json after.json --options match.toml
  clustermatch run before.json after.json --output result.json --compact

Each input file holds one partition: {\"clusterKey\": [\"itemId\", ...], ...}")]
    Run {
        /// Partition from the previous run
        before: PathBuf,

        /// Freshly recomputed partition
        after: PathBuf,

        /// TOML options file (solver budget, strict mode)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Write the JSON result to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Validate an options file without running
    #[command(after_help = "\
Examples:
  clustermatch validate match.toml")]
    Validate {
        /// Path to the options TOML file
        options: PathBuf,
    },
}

#[derive(Debug)]
struct CliError {
    code: u8,
    message: String,
}

impl CliError {
    fn new(code: u8, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run { before, after, options, output, compact } => {
            cmd_run(&before, &after, options.as_deref(), output.as_deref(), compact)
        }
        Commands::Validate { options } => cmd_validate(&options),
    };

    match outcome {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err.message);
            ExitCode::from(err.code)
        }
    }
}

fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_INVALID_OPTIONS,
        ReconError::InvalidPartitionValue { .. }
        | ReconError::DuplicateItemAcrossClusters { .. } => EXIT_INVALID_INPUT,
        ReconError::SolverNonConvergence { .. } => EXIT_NON_CONVERGENCE,
    }
}

fn load_options(path: Option<&Path>) -> Result<MatchOptions, CliError> {
    match path {
        None => Ok(MatchOptions::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                CliError::new(EXIT_IO, format!("cannot read {}: {e}", path.display()))
            })?;
            MatchOptions::from_toml(&text)
                .map_err(|e| CliError::new(recon_exit_code(&e), e.to_string()))
        }
    }
}

fn load_json(path: &Path) -> Result<serde_json::Value, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::new(EXIT_IO, format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text).map_err(|e| {
        CliError::new(EXIT_INVALID_INPUT, format!("{}: invalid JSON: {e}", path.display()))
    })
}

fn run_to_string(
    before_path: &Path,
    after_path: &Path,
    options_path: Option<&Path>,
    compact: bool,
) -> Result<String, CliError> {
    let options = load_options(options_path)?;
    let before = load_json(before_path)?;
    let after = load_json(after_path)?;

    let result = match_partitions_json(&before, &after, &options)
        .map_err(|e| CliError::new(recon_exit_code(&e), e.to_string()))?;

    let rendered = if compact {
        serde_json::to_string(&result)
    } else {
        serde_json::to_string_pretty(&result)
    };
    rendered.map_err(|e| CliError::new(EXIT_ERROR, format!("cannot render result: {e}")))
}

fn cmd_run(
    before_path: &Path,
    after_path: &Path,
    options_path: Option<&Path>,
    output_path: Option<&Path>,
    compact: bool,
) -> Result<(), CliError> {
    let rendered = run_to_string(before_path, after_path, options_path, compact)?;

    match output_path {
        Some(path) => std::fs::write(path, rendered + "\n").map_err(|e| {
            CliError::new(EXIT_IO, format!("cannot write {}: {e}", path.display()))
        }),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}

fn cmd_validate(options_path: &Path) -> Result<(), CliError> {
    load_options(Some(options_path))?;
    println!("{}: OK", options_path.display());
    Ok(())
}
