use std::fmt;

use crate::format::{FieldReader, FieldWriter};
use crate::{Record, Vec2};

/// Size of one `MSGASSISTBUSTUPPARAM.DAT` record: 2 * u16 + 6 * f32 + u32.
pub const ASSIST_RECORD_SIZE: usize = 0x20;

/// Identifies a navigator (assist) bust-up. Sorts by `major_id`, then `minor_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssistKey {
    pub major_id: u16,
    pub minor_id: u16,
}

impl AssistKey {
    pub const fn new(major_id: u16, minor_id: u16) -> Self {
        Self { major_id, minor_id }
    }
}

impl fmt::Display for AssistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b_{:04}_{:03}", self.major_id, self.minor_id)
    }
}

/// One entry of `MSGASSISTBUSTUPPARAM.DAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AssistRecord {
    pub major_id: u16,
    pub minor_id: u16,
    pub base_pos: Vec2,
    pub eye_pos: Vec2,
    pub mouth_pos: Vec2,
    pub flags: u32,
}

impl AssistRecord {
    /// Creates a record with the given key and flags and zeroed positions.
    pub fn new(key: AssistKey, flags: u32) -> Self {
        Self {
            major_id: key.major_id,
            minor_id: key.minor_id,
            flags,
            ..Self::default()
        }
    }
}

impl fmt::Display for AssistRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> type {:02} (Base:({}, {}) Eye:({}, {}) Mouth:({}, {}))",
            self.key(),
            self.flags,
            self.base_pos.x,
            self.base_pos.y,
            self.eye_pos.x,
            self.eye_pos.y,
            self.mouth_pos.x,
            self.mouth_pos.y
        )
    }
}

impl Record for AssistRecord {
    type Key = AssistKey;

    const NAME: &'static str = "MSGASSISTBUSTUPPARAM";
    const RECORD_SIZE: usize = ASSIST_RECORD_SIZE;

    fn key(&self) -> AssistKey {
        AssistKey::new(self.major_id, self.minor_id)
    }

    fn decode_from(buf: &[u8]) -> Self {
        let mut r = FieldReader::new(buf);
        Self {
            major_id: r.u16(),
            minor_id: r.u16(),
            base_pos: r.vec2(),
            eye_pos: r.vec2(),
            mouth_pos: r.vec2(),
            flags: r.u32(),
        }
    }

    fn encode_into(&self, buf: &mut [u8]) {
        let mut w = FieldWriter::new(buf);
        w.u16(self.major_id);
        w.u16(self.minor_id);
        w.vec2(self.base_pos);
        w.vec2(self.eye_pos);
        w.vec2(self.mouth_pos);
        w.u32(self.flags);
    }

    fn values_equal(&self, other: &Self) -> bool {
        self.major_id == other.major_id
            && self.minor_id == other.minor_id
            && self.base_pos == other.base_pos
            && self.eye_pos == other.eye_pos
            && self.mouth_pos == other.mouth_pos
            && self.flags == other.flags
    }
}
