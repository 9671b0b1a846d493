use super::helpers::*;
use crate::*;
use anyhow::Result;
use config::Config;
use record::{decode, encode, AssistRecord, BustupKey, BustupRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn config_for(root: &Path) -> Config {
    Config {
        mods_dir: root.join("mods"),
        original_dir: root.join("Original"),
        output_dir: root.join("Output"),
        ..Config::default()
    }
}

fn bustup_path(root: &Path, source: &str) -> PathBuf {
    root.join("mods").join(source).join(ParamKind::Bustup.output_path())
}

// -------------------- Baselines --------------------

#[test]
fn open_loads_both_baselines() -> Result<()> {
    let dir = tempdir()?;
    write_baselines(dir.path(), &[bustup(1, 0, 0, 2)], &[assist(1, 0, 3), assist(2, 0, 3)])?;

    let merger = Merger::open(dir.path())?;
    assert_eq!(merger.bustup().final_records().unwrap().len(), 1);
    assert_eq!(merger.assist().original_records().unwrap().len(), 2);
    assert_eq!(merger.report().assist.records, 2);
    Ok(())
}

#[test]
fn open_fails_without_baseline() -> Result<()> {
    let dir = tempdir()?;
    write_dat(
        &dir.path().join(ParamKind::Bustup.original_file_name()),
        &[bustup(1, 0, 0, 0)],
    )?;

    let err = Merger::open(dir.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("MSGASSISTBUSTUPPARAM_Original.DAT"));
    Ok(())
}

#[test]
fn open_fails_on_malformed_baseline() -> Result<()> {
    let dir = tempdir()?;
    write_baselines(dir.path(), &[bustup(1, 0, 0, 0)], &[])?;
    fs::write(dir.path().join(ParamKind::Bustup.original_file_name()), [0u8; 39])?;

    assert!(Merger::open(dir.path()).is_err());
    Ok(())
}

#[test]
fn merge_without_baseline_is_an_error() {
    let mut merger = Merger::new();
    let bytes = encode(&[bustup(1, 0, 0, 0)]);
    let err = merger.merge_bytes(ParamKind::Bustup, &bytes).unwrap_err();
    assert!(err.to_string().contains("not initialized"), "{}", err);
}

// -------------------- Folding --------------------

#[test]
fn merge_bytes_folds_and_tallies() -> Result<()> {
    let mut merger = Merger::new();
    merger.set_baseline(ParamKind::Bustup, &encode(&[bustup(1, 0, 0, 2), bustup(1, 0, 1, 3)]))?;

    let outcome = merger.merge_bytes(
        ParamKind::Bustup,
        &encode(&[bustup(1, 0, 0, 5), bustup(1, 0, 1, 3), bustup(4, 0, 0, 1)]),
    )?;
    assert_eq!(
        outcome,
        FileOutcome::Merged {
            records: 3,
            modified: 1,
            added: 1,
            skipped: 1
        }
    );

    let tally = &merger.report().bustup;
    assert_eq!(tally.files_merged, 1);
    assert_eq!(tally.records, 3);
    Ok(())
}

#[test]
fn malformed_override_is_skipped_whole() -> Result<()> {
    let mut merger = Merger::new();
    merger.set_baseline(ParamKind::Assist, &encode(&[assist(1, 0, 1)]))?;

    let mut bytes = encode(&[assist(1, 0, 9), assist(2, 0, 9)]);
    bytes.truncate(bytes.len() - 1);

    let outcome = merger.merge_bytes(ParamKind::Assist, &bytes)?;
    assert!(matches!(outcome, FileOutcome::Malformed { .. }));
    assert_eq!(merger.report().assist.files_malformed, 1);
    assert_eq!(
        flags(merger.assist().final_records().unwrap(), |r: &AssistRecord| r.flags),
        vec![(record::AssistKey::new(1, 0), 1)]
    );
    Ok(())
}

#[test]
fn merge_source_folds_each_file_once() -> Result<()> {
    let dir = tempdir()?;
    write_baselines(&dir.path().join("Original"), &[bustup(1, 0, 0, 2)], &[assist(1, 0, 1)])?;
    write_dat(&bustup_path(dir.path(), "m"), &[bustup(1, 0, 0, 8)])?;
    write_dat(
        &dir.path().join("mods/m").join(ParamKind::Assist.output_path()),
        &[assist(5, 5, 5)],
    )?;

    let mut merger = Merger::open(dir.path().join("Original"))?;
    let merged = merger.merge_source(
        &ModSource::new("m", dir.path().join("mods/m")),
        &[PathBuf::from(".")],
    )?;

    assert_eq!(merged, 2);
    assert_eq!(merger.report().sources, 1);
    assert_eq!(merger.bustup().final_records().unwrap()[0].flags, 8);
    assert_eq!(merger.assist().final_records().unwrap().len(), 2);
    Ok(())
}

// -------------------- Full run --------------------

#[test]
fn run_folds_sources_in_load_order() -> Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    write_baselines(
        &root.join("Original"),
        &[bustup(1, 0, 0, 2), bustup(1, 0, 1, 3)],
        &[assist(1, 0, 1)],
    )?;

    // Sorted by name "a_mod" would fold first; the load order puts it last.
    write_dat(&bustup_path(root, "a_mod"), &[bustup(1, 0, 0, 5), bustup(2, 0, 0, 1)])?;
    write_dat(&bustup_path(root, "b_mod"), &[bustup(1, 0, 1, 3), bustup(3, 0, 0, 9), bustup(1, 0, 0, 6)])?;

    let mut config = config_for(root);
    config.mod_order = vec!["b_mod".to_string(), "a_mod".to_string()];

    let mut sink = MemorySink::default();
    let report = run(&config, &mut sink)?;

    assert_eq!(report.sources, 2);
    assert_eq!(report.bustup.files_merged, 2);
    assert_eq!(report.bustup.skipped, 1);

    let bytes = &sink.files[&ParamKind::Bustup.output_path()];
    let merged: Vec<BustupRecord> = decode(bytes)?;
    assert_eq!(
        flags(&merged, |r: &BustupRecord| r.flags),
        vec![
            (BustupKey::new(1, 0, 0), 5),
            (BustupKey::new(1, 0, 1), 3),
            (BustupKey::new(2, 0, 0), 1),
            (BustupKey::new(3, 0, 0), 9),
        ]
    );

    // Nothing touched the assist table: the baseline is written back as-is.
    let assist_bytes = &sink.files[&ParamKind::Assist.output_path()];
    assert_eq!(assist_bytes, &encode(&[assist(1, 0, 1)]));
    Ok(())
}

#[test]
fn run_with_no_sources_writes_baselines() -> Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    let base = [bustup(3, 0, 0, 1), bustup(1, 0, 0, 1)];
    write_baselines(&root.join("Original"), &base, &[])?;

    let mut sink = MemorySink::default();
    let report = run(&config_for(root), &mut sink)?;

    assert_eq!(report.sources, 0);
    // Unfolded baselines are written in their original order.
    assert_eq!(sink.files[&ParamKind::Bustup.output_path()], encode(&base));
    assert!(sink.files[&ParamKind::Assist.output_path()].is_empty());
    Ok(())
}

#[test]
fn run_skips_malformed_file_and_continues() -> Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    write_baselines(&root.join("Original"), &[bustup(1, 0, 0, 2)], &[])?;

    let bad = bustup_path(root, "a_bad");
    fs::create_dir_all(bad.parent().unwrap())?;
    fs::write(&bad, [0u8; 41])?;
    write_dat(&bustup_path(root, "b_good"), &[bustup(7, 0, 0, 7)])?;

    let mut sink = MemorySink::default();
    let report = run(&config_for(root), &mut sink)?;

    assert_eq!(report.bustup.files_malformed, 1);
    assert_eq!(report.bustup.files_merged, 1);
    let merged: Vec<BustupRecord> = decode(&sink.files[&ParamKind::Bustup.output_path()])?;
    assert_eq!(merged.len(), 2);
    Ok(())
}
