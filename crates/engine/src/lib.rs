//! # Engine - Bust-up Parameter Merger
//!
//! The orchestrator that ties the [`record`] codec and the [`merge`] sessions
//! together: it loads the stock baselines, walks every contributing source
//! in load order, folds each override file it finds, and persists the
//! merged tables.
//!
//! ## Architecture
//!
//! ```text
//! Original/*_Original.DAT ──▶ set_original() ─┐
//!                                             ▼
//! mods/<source>/<probing path>/**/*.DAT ──▶ fold_override()   (once per file,
//!                                             │                 in load order)
//!                                             ▼
//!                              write_outputs() ──▶ OutputSink
//!                                                   Output/BUSTUP/DATA/BUSTUP_PARAM.DAT
//!                                                   Output/FONT/ASSIST/BUSTUP/MSGASSISTBUSTUPPARAM.DAT
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module        | Purpose                                                 |
//! |---------------|---------------------------------------------------------|
//! | [`lib.rs`]    | `Merger` struct, baseline loading, accessors, `run()`   |
//! | [`kind`]      | `ParamKind`: file names and output layout per table     |
//! | [`discovery`] | Source and override-file enumeration in a stable order  |
//! | [`fold`]      | Per-file and per-source folding, malformed-file skip    |
//! | [`output`]    | `OutputSink` trait, atomic `DirSink`, `write_outputs()` |
//!
//! ## Failure Policy
//!
//! A malformed override file is logged and skipped whole; it never reaches
//! a session, so the running tables are untouched. A missing or malformed
//! baseline, or an I/O failure, aborts the run.

mod discovery;
mod fold;
mod kind;
mod output;

use anyhow::{Context, Result};
use config::Config;
use merge::MergeSession;
use record::{AssistRecord, BustupRecord, Record};
use std::path::Path;
use tracing::info;

pub use discovery::{discover_override_files, discover_sources, ModSource, OverrideFile};
pub use fold::FileOutcome;
pub use kind::ParamKind;
pub use output::{DirSink, OutputSink};

/// Per-table tallies collected over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindReport {
    /// Override files folded into the table.
    pub files_merged: usize,
    /// Override files skipped because they were malformed.
    pub files_malformed: usize,
    pub modified: usize,
    pub added: usize,
    /// Incoming records dropped as identical to the baseline.
    pub skipped: usize,
    /// Record count of the merged table.
    pub records: usize,
}

/// Summary of a full merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub sources: usize,
    pub bustup: KindReport,
    pub assist: KindReport,
}

impl MergeReport {
    pub fn kind(&self, kind: ParamKind) -> &KindReport {
        match kind {
            ParamKind::Bustup => &self.bustup,
            ParamKind::Assist => &self.assist,
        }
    }

    pub(crate) fn kind_mut(&mut self, kind: ParamKind) -> &mut KindReport {
        match kind {
            ParamKind::Bustup => &mut self.bustup,
            ParamKind::Assist => &mut self.assist,
        }
    }
}

/// Holds one merge session per parameter table.
///
/// Sessions are folded strictly one file at a time through `&mut self`, in
/// the order the caller feeds sources.
pub struct Merger {
    pub(crate) bustup: MergeSession<BustupRecord>,
    pub(crate) assist: MergeSession<AssistRecord>,
    pub(crate) report: MergeReport,
}

impl std::fmt::Debug for Merger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Merger")
            .field("bustup_records", &self.bustup.final_records().map(<[_]>::len))
            .field("assist_records", &self.assist.final_records().map(<[_]>::len))
            .field("report", &self.report)
            .finish()
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

impl Merger {
    /// Creates a merger with no baselines. Every fold fails until
    /// [`set_baseline`](Self::set_baseline) is called for its kind.
    pub fn new() -> Self {
        Self {
            bustup: MergeSession::new(),
            assist: MergeSession::new(),
            report: MergeReport::default(),
        }
    }

    /// Creates a merger and loads both baselines from `original_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if either `*_Original.DAT` file is missing,
    /// unreadable or malformed. There is nothing meaningful to merge
    /// against without them.
    pub fn open<P: AsRef<Path>>(original_dir: P) -> Result<Self> {
        let original_dir = original_dir.as_ref();
        let mut merger = Self::new();

        for kind in ParamKind::ALL {
            let path = original_dir.join(kind.original_file_name());
            let bytes = std::fs::read(&path)
                .with_context(|| format!("failed to read {} baseline at {}", kind, path.display()))?;
            merger
                .set_baseline(kind, &bytes)
                .with_context(|| format!("invalid {} baseline at {}", kind, path.display()))?;
            info!(table = %kind, path = %path.display(), "loaded baseline");
        }

        Ok(merger)
    }

    /// Decodes `bytes` and installs them as the original baseline for `kind`.
    ///
    /// Replaces any earlier baseline and discards folds made against it.
    pub fn set_baseline(&mut self, kind: ParamKind, bytes: &[u8]) -> Result<usize> {
        fn install<R: Record>(session: &mut MergeSession<R>, bytes: &[u8]) -> Result<usize> {
            let records: Vec<R> = record::decode(bytes)?;
            session.set_original(&records);
            Ok(records.len())
        }

        let count = match kind {
            ParamKind::Bustup => install(&mut self.bustup, bytes)?,
            ParamKind::Assist => install(&mut self.assist, bytes)?,
        };
        self.report.kind_mut(kind).records = count;
        Ok(count)
    }

    pub fn bustup(&self) -> &MergeSession<BustupRecord> {
        &self.bustup
    }

    pub fn assist(&self) -> &MergeSession<AssistRecord> {
        &self.assist
    }

    /// Tallies accumulated so far.
    pub fn report(&self) -> &MergeReport {
        &self.report
    }

    /// Encodes the current merged table for `kind`.
    ///
    /// Returns `None` if no baseline has been set for it.
    pub fn encoded(&self, kind: ParamKind) -> Option<Vec<u8>> {
        match kind {
            ParamKind::Bustup => self.bustup.final_records().map(record::encode),
            ParamKind::Assist => self.assist.final_records().map(record::encode),
        }
    }
}

/// Runs a full merge as configured: load baselines, fold every source in
/// load order, write both merged tables to `sink`.
pub fn run(config: &Config, sink: &mut dyn OutputSink) -> Result<MergeReport> {
    let mut merger = Merger::open(&config.original_dir)?;

    let sources = discover_sources(&config.mods_dir, &config.mod_order)?;
    for source in &sources {
        merger.merge_source(source, &config.probing_paths)?;
    }

    merger.write_outputs(sink)?;
    Ok(merger.report().clone())
}

#[cfg(test)]
mod tests;
