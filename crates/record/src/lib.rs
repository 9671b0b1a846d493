//! # Record - Bust-up Parameter Records
//!
//! Fixed-width binary records for the two bust-up parameter tables shipped
//! with the game: `BUSTUP_PARAM.DAT` ([`BustupRecord`]) and
//! `MSGASSISTBUSTUPPARAM.DAT` ([`AssistRecord`]).
//!
//! A parameter file has no header and no footer. It is nothing but the
//! concatenation of its records, so the record count is always
//! `file_len / RECORD_SIZE` and any remainder means the file is malformed.
//!
//! ## Bustup layout (0x28 bytes)
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ major_id (u16) | minor_id (u16) | sub_id (u16) | align1 (u16) │
//! │ base.x (f32)   | base.y (f32)                                 │
//! │ eye.x (f32)    | eye.y (f32)                                  │
//! │ mouth.x (f32)  | mouth.y (f32)                                │
//! │ flags (u32)    | align3 (u32)                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Assist layout (0x20 bytes)
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ major_id (u16) | minor_id (u16)                               │
//! │ base.x (f32)   | base.y (f32)                                 │
//! │ eye.x (f32)    | eye.y (f32)                                  │
//! │ mouth.x (f32)  | mouth.y (f32)                                │
//! │ flags (u32)                                                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! All fields are **big-endian** regardless of the host. The alignment
//! fields are opaque and round-trip unchanged.

mod assist;
mod bustup;
mod format;

use std::fmt;
use std::io;

use thiserror::Error;

pub use assist::{AssistKey, AssistRecord, ASSIST_RECORD_SIZE};
pub use bustup::{BustupKey, BustupRecord, BUSTUP_RECORD_SIZE};
pub use format::{decode, encode, read_file, record_count, write_file};

/// An (x, y) offset in bust-up space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One fixed-size entry of a parameter table.
///
/// Implementors describe their own on-disk layout; the free functions
/// [`decode`] and [`encode`] take care of slicing a buffer into records.
pub trait Record: Clone + fmt::Debug + fmt::Display {
    /// Composite identifier. Its `Ord` must compare components in declared
    /// order, which is what the merged table is sorted by.
    type Key: Ord + Copy + fmt::Debug + fmt::Display;

    /// Human-readable table name used in diagnostics.
    const NAME: &'static str;

    /// Size of one record on disk, in bytes.
    const RECORD_SIZE: usize;

    fn key(&self) -> Self::Key;

    /// Decodes one record from exactly [`Self::RECORD_SIZE`] bytes.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is shorter than [`Self::RECORD_SIZE`]. [`decode`]
    /// checks the length before calling this.
    fn decode_from(buf: &[u8]) -> Self;

    /// Encodes this record into exactly [`Self::RECORD_SIZE`] bytes.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is shorter than [`Self::RECORD_SIZE`].
    fn encode_into(&self, buf: &mut [u8]);

    /// Returns `true` if every field, key included, compares equal.
    ///
    /// Floats compare numerically, so `0.0` equals `-0.0` and a `NaN` never
    /// equals anything.
    fn values_equal(&self, other: &Self) -> bool;
}

/// Errors that can occur while decoding or reading a parameter file.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The buffer length is not a multiple of the record size.
    #[error("malformed {kind} file: {len} bytes is not a multiple of the {record_size}-byte record size")]
    Malformed {
        kind: &'static str,
        len: usize,
        record_size: usize,
    },

    /// An underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests;
