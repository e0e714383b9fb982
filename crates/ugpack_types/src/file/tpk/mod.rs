//! TPK texture animation pack support.
//!
//! Texture packs (TPK) of Need for Speed: Underground carry an optional
//! animation pack: a list of named slots, each cycling through a sequence of
//! textures at a given frame rate. This module reads and writes that pack in
//! two forms:
//!
//! - **Native block** ([`AnimationPack::assemble`] / [`AnimationPack::disassemble`]):
//!   the exact layout the game engine loads, with fixed-size slot records and a
//!   flat frame table.
//! - **Serialized form** ([`AnimationPack::serialize`] / [`AnimationPack::deserialize`]):
//!   a compact, compressed layout used only by this toolkit.
//!
//! # Native Block Structure
//!
//! ```text
//! Offset  Size      Field
//! ------  --------  ----------------------------------------------
//! 0x00    4         pack tag          (0xB0300100 for Underground)
//! 0x04    4         payload size
//! 0x08    4         header tag        (0x30300101)
//! 0x0C    4         0x10
//! 0x10    4         version
//! 0x14    12        reserved
//! 0x20    4         slots tag         (0x30300102)
//! 0x24    4         slot_count × 0x34
//! 0x28    ...       slot records
//!         4         frames tag        (0x30300103)
//!         4         frame_count × 0x10
//!         ...       frame entries     (key + 12 reserved bytes)
//! ```
//!
//! ## Frame Redistribution
//!
//! The frame table stores the entries of all slots back to back with no
//! delimiters. Each slot record declares how many frames it owns, and reading
//! assigns entries to slots in order until each declared count is reached.
//! Packs whose counts disagree with the table are accepted: reading stops when
//! either side runs out.
//!
//! # Usage Examples
//!
//! ## Reading a pack and listing its slots
//!
//! ```no_run
//! use ugpack_types::{file::tpk::AnimationPack, hash::KeyDictionary};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("anims.bin")?;
//! let dict = KeyDictionary::from_names(["FIRE_01", "FIRE_02"]);
//! let pack = AnimationPack::from_bytes(&data, &dict)?;
//!
//! for slot in pack.slots() {
//!     println!("{} @ {} fps: {} frames", slot.name(), slot.frames_per_second, slot.frame_count());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Merging a reimported pack
//!
//! ```
//! use ugpack_types::file::tpk::{AnimSlot, AnimationPack};
//!
//! let mut local = AnimationPack::new("ANIMS");
//! local.add_slot(AnimSlot::new("fire").unwrap());
//!
//! let mut incoming = AnimationPack::new("ANIMS");
//! incoming.add_slot(AnimSlot::new("smoke").unwrap());
//!
//! local.synchronize(&incoming);
//! assert_eq!(local.slot_count(), 2);
//! ```

pub mod constants;
pub mod descriptor;
pub mod frame;
pub mod pack;
pub mod serialize;
pub mod slot;
pub mod sync;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use self::descriptor::FieldDescriptor;
pub use self::frame::FrameEntry;
pub use self::pack::AnimationPack;
pub use self::serialize::SerializationHeader;
pub use self::slot::AnimSlot;
pub use self::sync::synchronize;
