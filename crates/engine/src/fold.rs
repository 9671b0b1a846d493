//! Folding override files into the per-table sessions.
//!
//! Decoding happens before a session is touched, so a malformed file is
//! dropped whole and can never leave a table half-merged.

use anyhow::{Context, Result};
use merge::MergeSession;
use record::{FormatError, Record};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::{discover_override_files, Merger, ModSource, OverrideFile, ParamKind};

/// Result of offering one override file to the merger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file decoded and was folded.
    Merged {
        records: usize,
        modified: usize,
        added: usize,
        skipped: usize,
    },
    /// The file was not a whole number of records and was ignored.
    Malformed { reason: String },
}

fn fold_bytes<R: Record>(session: &mut MergeSession<R>, bytes: &[u8]) -> Result<FileOutcome> {
    let records: Vec<R> = match record::decode(bytes) {
        Ok(records) => records,
        Err(e @ FormatError::Malformed { .. }) => {
            return Ok(FileOutcome::Malformed {
                reason: e.to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    let summary = session.fold_override(&records)?;
    Ok(FileOutcome::Merged {
        records: records.len(),
        modified: summary.modified,
        added: summary.added,
        skipped: summary.skipped.len(),
    })
}

impl Merger {
    /// Folds an in-memory override table of `kind`.
    ///
    /// # Errors
    ///
    /// Fails if no baseline was set for `kind`. A malformed buffer is not an
    /// error; it is reported as [`FileOutcome::Malformed`] and changes nothing.
    pub fn merge_bytes(&mut self, kind: ParamKind, bytes: &[u8]) -> Result<FileOutcome> {
        let outcome = match kind {
            ParamKind::Bustup => fold_bytes(&mut self.bustup, bytes)?,
            ParamKind::Assist => fold_bytes(&mut self.assist, bytes)?,
        };

        let records = match kind {
            ParamKind::Bustup => self.bustup.final_records().map_or(0, <[_]>::len),
            ParamKind::Assist => self.assist.final_records().map_or(0, <[_]>::len),
        };

        let tally = self.report.kind_mut(kind);
        match &outcome {
            FileOutcome::Merged {
                modified,
                added,
                skipped,
                ..
            } => {
                tally.files_merged += 1;
                tally.modified += modified;
                tally.added += added;
                tally.skipped += skipped;
            }
            FileOutcome::Malformed { .. } => tally.files_malformed += 1,
        }
        tally.records = records;

        Ok(outcome)
    }

    /// Reads and folds one override file on behalf of `source_name`.
    pub fn merge_file(&mut self, file: &OverrideFile, source_name: &str) -> Result<FileOutcome> {
        let bytes = std::fs::read(&file.path)
            .with_context(|| format!("failed to read override {}", file.path.display()))?;

        let outcome = self
            .merge_bytes(file.kind, &bytes)
            .with_context(|| format!("failed to merge {}", file.path.display()))?;

        match &outcome {
            FileOutcome::Merged { records, .. } => {
                info!(
                    table = %file.kind,
                    source = source_name,
                    records = *records,
                    "merged entries from {}",
                    file.path.display()
                );
            }
            FileOutcome::Malformed { reason } => {
                warn!(
                    table = %file.kind,
                    source = source_name,
                    "skipping {}: {}",
                    file.path.display(),
                    reason
                );
            }
        }

        Ok(outcome)
    }

    /// Folds every override file of `source`, in discovery order.
    ///
    /// Returns the number of files that were merged.
    pub fn merge_source(&mut self, source: &ModSource, probing_paths: &[PathBuf]) -> Result<usize> {
        let files = discover_override_files(source, probing_paths)?;
        self.report.sources += 1;

        let mut merged = 0;
        for file in &files {
            if let FileOutcome::Merged { .. } = self.merge_file(file, &source.name)? {
                merged += 1;
            }
        }
        Ok(merged)
    }
}
