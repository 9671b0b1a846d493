//! # bustup-merge
//!
//! Merges the bust-up parameter tables shipped by every installed mod into
//! one `BUSTUP_PARAM.DAT` and one `MSGASSISTBUSTUPPARAM.DAT` the game can
//! load unmodified.
//!
//! ## Commands
//!
//! ```text
//! merge                        Fold all sources and write the merged tables (default)
//! dump <file> [--kind KIND]    Print every record of a parameter file
//! ```
//!
//! ## Configuration
//!
//! `merge` is configured through environment variables:
//!
//! ```text
//! BUSTUP_MODS_DIR       directory whose subdirectories are sources  (default: "mods")
//! BUSTUP_MOD_ORDER      comma-separated source load order          (default: "")
//! BUSTUP_PROBING_PATHS  comma-separated sub-paths per source       (default: ".")
//! BUSTUP_ORIGINAL_DIR   directory with the *_Original.DAT baselines (default: "Original")
//! BUSTUP_OUTPUT_DIR     directory receiving the merged files        (default: "Output")
//! BUSTUP_DEBUG          extra diagnostic messages                   (default: "false")
//! ```
//!
//! Logs go to stderr. `RUST_LOG` overrides the level picked by `BUSTUP_DEBUG`.
//!
//! ## Example
//!
//! ```text
//! $ BUSTUP_MOD_ORDER=base_fix,new_outfits bustup-merge
//! BUSTUP_PARAM: 1204 records (2 files merged, 0 malformed, 3 modified, 12 added, 1190 skipped)
//! MSGASSISTBUSTUPPARAM: 96 records (0 files merged, 0 malformed, 0 modified, 0 added, 0 skipped)
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use engine::{DirSink, KindReport, ParamKind};
use record::{AssistRecord, BustupRecord, Record};
use std::path::{Path, PathBuf};
use table::Table;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bustup-merge", version, about = "Merge bust-up parameter tables from mods")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fold every source into the baselines and write the merged tables.
    Merge,
    /// Print every record of a parameter file.
    Dump {
        file: PathBuf,
        /// Table kind; inferred from the file name when omitted.
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Bustup,
    Assist,
}

impl From<KindArg> for ParamKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Bustup => ParamKind::Bustup,
            KindArg::Assist => ParamKind::Assist,
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Guesses the table kind of a file from its name, accepting both override
/// and `*_Original.DAT` names.
fn infer_kind(path: &Path) -> Option<ParamKind> {
    let name = path.file_name()?.to_str()?.to_ascii_uppercase();
    if name.contains("MSGASSISTBUSTUPPARAM") {
        Some(ParamKind::Assist)
    } else if name.contains("BUSTUP_PARAM") {
        Some(ParamKind::Bustup)
    } else {
        None
    }
}

fn format_report(kind: ParamKind, report: &KindReport) -> String {
    format!(
        "{}: {} records ({} files merged, {} malformed, {} modified, {} added, {} skipped)",
        kind,
        report.records,
        report.files_merged,
        report.files_malformed,
        report.modified,
        report.added,
        report.skipped
    )
}

fn run_merge(config: &Config) -> Result<()> {
    info!(
        mods_dir = %config.mods_dir.display(),
        original_dir = %config.original_dir.display(),
        output_dir = %config.output_dir.display(),
        "starting merge"
    );

    let mut sink = DirSink::new(&config.output_dir);
    let report = engine::run(config, &mut sink)?;

    info!(sources = report.sources, "merge finished");
    for kind in ParamKind::ALL {
        println!("{}", format_report(kind, report.kind(kind)));
    }
    Ok(())
}

fn dump_records<R: Record>(bytes: &[u8]) -> Result<()> {
    let table = Table::<R>::decode(bytes)?;
    for record in &table {
        println!("{}", record);
    }
    println!("({} entries)", table.len());
    Ok(())
}

fn run_dump(file: &Path, kind: Option<KindArg>) -> Result<()> {
    let kind = match kind.map(ParamKind::from).or_else(|| infer_kind(file)) {
        Some(kind) => kind,
        None => bail!(
            "cannot tell the table kind of {}; pass --kind bustup|assist",
            file.display()
        ),
    };

    let bytes =
        std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let dumped = match kind {
        ParamKind::Bustup => dump_records::<BustupRecord>(&bytes),
        ParamKind::Assist => dump_records::<AssistRecord>(&bytes),
    };
    dumped.with_context(|| format!("failed to dump {}", file.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_logging(config.debug);

    match cli.command.unwrap_or(Command::Merge) {
        Command::Merge => run_merge(&config),
        Command::Dump { file, kind } => run_dump(&file, kind),
    }
}
