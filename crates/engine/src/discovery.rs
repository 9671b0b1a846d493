//! Source and override-file enumeration.
//!
//! Fold order decides conflicts between sources, so every listing here is
//! deterministic: sources follow the configured load order and then their
//! names, and files are sorted by path within each probing path.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::ParamKind;

/// One contributor of override files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModSource {
    pub name: String,
    pub root: PathBuf,
}

impl ModSource {
    pub fn new<S: Into<String>, P: Into<PathBuf>>(name: S, root: P) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }
}

/// An override file found inside a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideFile {
    pub kind: ParamKind,
    pub path: PathBuf,
}

/// Lists the subdirectories of `mods_dir` as sources.
///
/// Names listed in `order` come first, in that order; the rest follow
/// sorted by name. Names in `order` with no matching directory are ignored.
/// A missing `mods_dir` yields no sources.
pub fn discover_sources(mods_dir: &Path, order: &[String]) -> Result<Vec<ModSource>> {
    if !mods_dir.is_dir() {
        warn!(path = %mods_dir.display(), "mods directory not found, nothing to merge");
        return Ok(Vec::new());
    }

    let mut found: Vec<ModSource> = Vec::new();
    for entry in fs::read_dir(mods_dir)
        .with_context(|| format!("failed to list {}", mods_dir.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            found.push(ModSource::new(name, entry.path()));
        }
    }
    found.sort_by(|a, b| a.name.cmp(&b.name));

    let mut sources = Vec::with_capacity(found.len());
    for name in order {
        if let Some(pos) = found.iter().position(|s| &s.name == name) {
            sources.push(found.remove(pos));
        }
    }
    sources.extend(found);

    debug!(count = sources.len(), "discovered sources");
    Ok(sources)
}

/// Lists the override files of `source`.
///
/// Each probing path is searched recursively in the order given; within one
/// probing path files are sorted by path. A file reachable through two
/// probing paths is listed once, at its first position.
pub fn discover_override_files(
    source: &ModSource,
    probing_paths: &[PathBuf],
) -> Result<Vec<OverrideFile>> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for probing in probing_paths {
        // Collecting components drops interior `.` so that overlapping
        // probing paths produce identical file paths.
        let dir: PathBuf = source.root.join(probing).components().collect();
        if !dir.is_dir() {
            continue;
        }

        let mut found = Vec::new();
        walk_dat_files(&dir, &mut found)?;
        found.sort();

        for path in found {
            let kind = match path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(ParamKind::from_file_name)
            {
                Some(kind) => kind,
                None => continue,
            };
            if seen.insert(path.clone()) {
                files.push(OverrideFile { kind, path });
            }
        }
    }

    Ok(files)
}

/// Collects every `*.DAT` file (any case) below `dir`.
fn walk_dat_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            walk_dat_files(&path, out)?;
        } else if file_type.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("dat"))
                .unwrap_or(false)
        {
            out.push(path);
        }
    }
    Ok(())
}
