//! TPK animation pack constants shared by every game layout.
//!
//! Record sizes and block ids differ per game and live in
//! [`Layout`](crate::game::Layout); the values here are fixed by the format itself.

/// Default pack format version
pub const DEFAULT_VERSION: i32 = 1;

/// Zeroed fields after the version in the pack header (`pTextureAnimPack`, `EndianSwapped`, pad)
pub const HEADER_RESERVED_FIELDS: usize = 3;

/// Zeroed runtime fields at the end of a slot record (table pointer, valid flag, current frame)
pub const SLOT_RESERVED_FIELDS: usize = 3;

/// Zeroed fields after the key in a frame table entry (texture info, platform data, pad)
pub const FRAME_RESERVED_FIELDS: usize = 3;

/// Bytes of fixed-size fields in a compact slot record (count, fps, time base)
pub const COMPACT_SLOT_FIXED_SIZE: usize = 12;

/// Bytes per frame key in a compact slot record
pub const COMPACT_FRAME_SIZE: usize = 4;

/// Size of the slot count prefix of a serialized pack
pub const SERIALIZED_COUNT_SIZE: usize = 4;

/// Upper bound of the LZ4 block expansion ratio.
pub const LZ4_MAX_RATIO: usize = 255;
