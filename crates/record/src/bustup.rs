use std::fmt;

use crate::format::{FieldReader, FieldWriter};
use crate::{Record, Vec2};

/// Size of one `BUSTUP_PARAM.DAT` record: 4 * u16 + 6 * f32 + 2 * u32.
pub const BUSTUP_RECORD_SIZE: usize = 0x28;

/// Identifies a bust-up sprite: character, expression and outfit variant.
///
/// Field order matters: the derived `Ord` sorts by `major_id`, then
/// `minor_id`, then `sub_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BustupKey {
    pub major_id: u16,
    pub minor_id: u16,
    pub sub_id: u16,
}

impl BustupKey {
    pub const fn new(major_id: u16, minor_id: u16, sub_id: u16) -> Self {
        Self {
            major_id,
            minor_id,
            sub_id,
        }
    }
}

impl fmt::Display for BustupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "b_{:04}_{:03}_{:02}",
            self.major_id, self.minor_id, self.sub_id
        )
    }
}

/// One entry of `BUSTUP_PARAM.DAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BustupRecord {
    pub major_id: u16,
    pub minor_id: u16,
    pub sub_id: u16,
    /// Opaque padding, preserved as read.
    pub align1: u16,
    pub base_pos: Vec2,
    pub eye_pos: Vec2,
    pub mouth_pos: Vec2,
    /// Bust-up type code.
    pub flags: u32,
    /// Opaque padding, preserved as read.
    pub align3: u32,
}

impl BustupRecord {
    /// Creates a record with the given key and flags and every other field zeroed.
    pub fn new(key: BustupKey, flags: u32) -> Self {
        Self {
            major_id: key.major_id,
            minor_id: key.minor_id,
            sub_id: key.sub_id,
            flags,
            ..Self::default()
        }
    }
}

impl fmt::Display for BustupRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> type {:02}", self.key(), self.flags)
    }
}

impl Record for BustupRecord {
    type Key = BustupKey;

    const NAME: &'static str = "BUSTUP_PARAM";
    const RECORD_SIZE: usize = BUSTUP_RECORD_SIZE;

    fn key(&self) -> BustupKey {
        BustupKey::new(self.major_id, self.minor_id, self.sub_id)
    }

    fn decode_from(buf: &[u8]) -> Self {
        let mut r = FieldReader::new(buf);
        Self {
            major_id: r.u16(),
            minor_id: r.u16(),
            sub_id: r.u16(),
            align1: r.u16(),
            base_pos: r.vec2(),
            eye_pos: r.vec2(),
            mouth_pos: r.vec2(),
            flags: r.u32(),
            align3: r.u32(),
        }
    }

    fn encode_into(&self, buf: &mut [u8]) {
        let mut w = FieldWriter::new(buf);
        w.u16(self.major_id);
        w.u16(self.minor_id);
        w.u16(self.sub_id);
        w.u16(self.align1);
        w.vec2(self.base_pos);
        w.vec2(self.eye_pos);
        w.vec2(self.mouth_pos);
        w.u32(self.flags);
        w.u32(self.align3);
    }

    fn values_equal(&self, other: &Self) -> bool {
        self.major_id == other.major_id
            && self.minor_id == other.minor_id
            && self.sub_id == other.sub_id
            && self.align1 == other.align1
            && self.base_pos == other.base_pos
            && self.eye_pos == other.eye_pos
            && self.mouth_pos == other.mouth_pos
            && self.flags == other.flags
            && self.align3 == other.align3
    }
}
