//! The two parameter tables handled by the merger, and where they live.

use std::fmt;
use std::path::PathBuf;

use record::{AssistRecord, BustupRecord, Record};

/// Selects one of the parameter tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// `BUSTUP_PARAM.DAT`: field bust-ups.
    Bustup,
    /// `MSGASSISTBUSTUPPARAM.DAT`: navigator bust-ups.
    Assist,
}

impl ParamKind {
    /// Every kind, in the order outputs are written.
    pub const ALL: [ParamKind; 2] = [ParamKind::Bustup, ParamKind::Assist];

    /// Name of an override file of this kind inside a source.
    pub fn file_name(self) -> &'static str {
        match self {
            ParamKind::Bustup => "BUSTUP_PARAM.DAT",
            ParamKind::Assist => "MSGASSISTBUSTUPPARAM.DAT",
        }
    }

    /// Name of the stock baseline file inside the original directory.
    pub fn original_file_name(self) -> &'static str {
        match self {
            ParamKind::Bustup => "BUSTUP_PARAM_Original.DAT",
            ParamKind::Assist => "MSGASSISTBUSTUPPARAM_Original.DAT",
        }
    }

    /// Path of the merged file relative to the output root. Mirrors the
    /// path the game loads the table from.
    pub fn output_path(self) -> PathBuf {
        match self {
            ParamKind::Bustup => ["BUSTUP", "DATA", "BUSTUP_PARAM.DAT"].iter().collect(),
            ParamKind::Assist => ["FONT", "ASSIST", "BUSTUP", "MSGASSISTBUSTUPPARAM.DAT"]
                .iter()
                .collect(),
        }
    }

    pub fn record_size(self) -> usize {
        match self {
            ParamKind::Bustup => BustupRecord::RECORD_SIZE,
            ParamKind::Assist => AssistRecord::RECORD_SIZE,
        }
    }

    /// Classifies an override file by name, ignoring ASCII case.
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| name.eq_ignore_ascii_case(kind.file_name()))
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParamKind::Bustup => BustupRecord::NAME,
            ParamKind::Assist => AssistRecord::NAME,
        })
    }
}
