use anyhow::Result;
use record::{AssistKey, AssistRecord, BustupKey, BustupRecord, Record};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{OutputSink, ParamKind};

pub fn bustup(major: u16, minor: u16, sub: u16, flags: u32) -> BustupRecord {
    BustupRecord::new(BustupKey::new(major, minor, sub), flags)
}

pub fn assist(major: u16, minor: u16, flags: u32) -> AssistRecord {
    AssistRecord::new(AssistKey::new(major, minor), flags)
}

/// Writes `records` to `path`, creating parent directories.
pub fn write_dat<R: Record>(path: &Path, records: &[R]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    record::write_file(path, records)?;
    Ok(())
}

/// Writes both stock baselines into `dir`.
pub fn write_baselines(dir: &Path, bustups: &[BustupRecord], assists: &[AssistRecord]) -> Result<()> {
    write_dat(&dir.join(ParamKind::Bustup.original_file_name()), bustups)?;
    write_dat(&dir.join(ParamKind::Assist.original_file_name()), assists)?;
    Ok(())
}

/// Keeps written outputs in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: BTreeMap<PathBuf, Vec<u8>>,
}

impl OutputSink for MemorySink {
    fn write(&mut self, relative_path: &Path, bytes: &[u8]) -> Result<()> {
        self.files.insert(relative_path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}

pub fn flags<R: Record>(records: &[R], flags_of: impl Fn(&R) -> u32) -> Vec<(R::Key, u32)> {
    records.iter().map(|r| (r.key(), flags_of(r))).collect()
}
