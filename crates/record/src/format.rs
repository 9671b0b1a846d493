//! Record slicing and big-endian field helpers.
//!
//! A parameter file is `count * RECORD_SIZE` bytes of back-to-back records.
//! [`decode`] splits a buffer with `chunks_exact` and hands each chunk to the
//! record kind; [`encode`] does the reverse into a pre-sized buffer.

use byteorder::{BigEndian, ByteOrder};
use std::fs;
use std::path::Path;

use crate::{FormatError, Record, Vec2};

/// Returns the number of `R` records held by a buffer of `len` bytes.
///
/// # Errors
///
/// Returns [`FormatError::Malformed`] if `len` is not a multiple of
/// `R::RECORD_SIZE`.
pub fn record_count<R: Record>(len: usize) -> Result<usize, FormatError> {
    if len % R::RECORD_SIZE != 0 {
        return Err(FormatError::Malformed {
            kind: R::NAME,
            len,
            record_size: R::RECORD_SIZE,
        });
    }
    Ok(len / R::RECORD_SIZE)
}

/// Decodes every record in `bytes`, in file order.
///
/// An empty buffer is a valid, empty table.
pub fn decode<R: Record>(bytes: &[u8]) -> Result<Vec<R>, FormatError> {
    let count = record_count::<R>(bytes.len())?;
    let mut records = Vec::with_capacity(count);
    for chunk in bytes.chunks_exact(R::RECORD_SIZE) {
        records.push(R::decode_from(chunk));
    }
    Ok(records)
}

/// Encodes `records` back to back, in the order given.
#[must_use]
pub fn encode<R: Record>(records: &[R]) -> Vec<u8> {
    let mut buf = vec![0u8; records.len() * R::RECORD_SIZE];
    for (record, chunk) in records.iter().zip(buf.chunks_exact_mut(R::RECORD_SIZE)) {
        record.encode_into(chunk);
    }
    buf
}

/// Reads and decodes a whole parameter file.
///
/// Nothing is returned for a malformed file, so a caller can never end up
/// with a partially decoded table.
pub fn read_file<R: Record, P: AsRef<Path>>(path: P) -> Result<Vec<R>, FormatError> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}

/// Encodes `records` and writes them to `path`, replacing any existing file.
pub fn write_file<R: Record, P: AsRef<Path>>(path: P, records: &[R]) -> Result<(), FormatError> {
    fs::write(path, encode(records))?;
    Ok(())
}

/// Sequential big-endian reader over one record's bytes.
pub(crate) struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn u16(&mut self) -> u16 {
        let v = BigEndian::read_u16(&self.buf[self.pos..]);
        self.pos += 2;
        v
    }

    pub(crate) fn u32(&mut self) -> u32 {
        let v = BigEndian::read_u32(&self.buf[self.pos..]);
        self.pos += 4;
        v
    }

    pub(crate) fn f32(&mut self) -> f32 {
        let v = BigEndian::read_f32(&self.buf[self.pos..]);
        self.pos += 4;
        v
    }

    pub(crate) fn vec2(&mut self) -> Vec2 {
        let x = self.f32();
        let y = self.f32();
        Vec2 { x, y }
    }
}

/// Sequential big-endian writer over one record's bytes.
pub(crate) struct FieldWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> FieldWriter<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn u16(&mut self, v: u16) {
        BigEndian::write_u16(&mut self.buf[self.pos..], v);
        self.pos += 2;
    }

    pub(crate) fn u32(&mut self, v: u32) {
        BigEndian::write_u32(&mut self.buf[self.pos..], v);
        self.pos += 4;
    }

    pub(crate) fn f32(&mut self, v: f32) {
        BigEndian::write_f32(&mut self.buf[self.pos..], v);
        self.pos += 4;
    }

    pub(crate) fn vec2(&mut self, v: Vec2) {
        self.f32(v.x);
        self.f32(v.y);
    }
}
