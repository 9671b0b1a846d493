//! Persisting merged tables.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{Merger, ParamKind};

/// Destination for merged tables.
///
/// `relative_path` is the logical location of the table (see
/// [`ParamKind::output_path`]); how it maps to storage is up to the sink.
pub trait OutputSink {
    fn write(&mut self, relative_path: &Path, bytes: &[u8]) -> Result<()>;
}

/// Writes tables below a root directory, creating parent directories.
///
/// Each file is written to `<name>.tmp`, fsynced, then renamed into place,
/// so a reader never observes a half-written table.
#[derive(Debug, Clone)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl OutputSink for DirSink {
    fn write(&mut self, relative_path: &Path, bytes: &[u8]) -> Result<()> {
        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let written = write_and_rename(&tmp_path, &path, bytes);
        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        written?;

        // Make the rename itself durable.
        if let Some(parent) = path.parent() {
            if let Ok(dir) = fs::File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }
}

fn write_and_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(tmp_path)
        .with_context(|| format!("failed to create {}", tmp_path.display()))?;
    f.write_all(bytes)?;
    f.flush()?;
    f.sync_all()?;
    drop(f);

    fs::rename(tmp_path, path)
        .with_context(|| format!("failed to move output into {}", path.display()))?;
    Ok(())
}

impl Merger {
    /// Encodes every initialized table and hands it to `sink`.
    ///
    /// Tables whose baseline was never set are not written.
    ///
    /// A table that never received a non-empty fold is written exactly as
    /// its baseline was supplied: file order, duplicate keys included. Only
    /// a fold rebuilds `final` as a sorted, key-unique table.
    pub fn write_outputs(&self, sink: &mut dyn OutputSink) -> Result<()> {
        for kind in ParamKind::ALL {
            let Some(bytes) = self.encoded(kind) else {
                continue;
            };
            let relative = kind.output_path();
            sink.write(&relative, &bytes)
                .with_context(|| format!("failed to write merged {}", kind))?;
            debug!(
                table = %kind,
                records = bytes.len() / kind.record_size(),
                "wrote merged {}",
                relative.display()
            );
        }
        Ok(())
    }
}
