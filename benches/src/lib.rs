//! Benchmark helper utilities for ugpack-rs
//!
//! This module generates synthetic animation packs and charsets for the
//! benchmark suite, so no game files are required to run it.

use ugpack_types::file::{
	CHARSET_ENTRY_TABLE_LEN,
	charset::Charset,
	tpk::{AnimSlot, AnimationPack},
};

/// First lead byte used as a two-byte selector by [`generate_charset`].
pub const SELECTOR_LEAD_START: usize = 0xE0;

/// Generates a pack with `slots` slots of `frames` frames each.
///
/// Frame textures are named `ANIM_{slot}_{frame}` so they can be resolved
/// through [`frame_names`].
pub fn generate_pack(slots: usize, frames: usize) -> AnimationPack {
	let mut pack = AnimationPack::new("BENCH_ANIMS");
	for slot_index in 0..slots {
		// slot names never contain whitespace
		let Ok(mut slot) = AnimSlot::new(&format!("ANIM_{slot_index}")) else {
			continue;
		};
		slot.frames_per_second = 15 + (slot_index % 16) as i32;
		for frame in 0..frames {
			slot.add_frame(format!("ANIM_{slot_index}_{frame}"));
		}
		pack.add_slot(slot);
	}
	pack
}

/// All frame texture names used by [`generate_pack`].
pub fn frame_names(slots: usize, frames: usize) -> Vec<String> {
	(0..slots)
		.flat_map(|slot| (0..frames).map(move |frame| format!("ANIM_{slot}_{frame}")))
		.collect()
}

/// Generates a fully populated charset.
///
/// - Lead bytes `0x80..0xE0` map directly to hiragana starting at U+3041
/// - Lead bytes `0xE0..0xF6` select table pages 2..=23
/// - Table indices `0x100..0xC00` map to CJK ideographs starting at U+4E00
pub fn generate_charset() -> Charset {
	let mut table = [0u16; CHARSET_ENTRY_TABLE_LEN];

	for (i, entry) in table[0x80..SELECTOR_LEAD_START].iter_mut().enumerate() {
		*entry = 0x3041 + i as u16;
	}
	let pages = CHARSET_ENTRY_TABLE_LEN / 128;
	for (page, entry) in (2..pages).zip(table[SELECTOR_LEAD_START..].iter_mut()) {
		*entry = page as u16;
	}
	for (i, entry) in table[0x100..].iter_mut().enumerate() {
		*entry = 0x4E00 + i as u16;
	}

	Charset::with_table(CHARSET_ENTRY_TABLE_LEN as i32, table)
}

/// Generates `len` characters of mixed ASCII, single-byte and two-byte text
/// encodable by [`generate_charset`].
pub fn generate_text(len: usize) -> String {
	(0..len)
		.filter_map(|i| match i % 4 {
			0 => char::from_u32(0x61 + (i % 26) as u32),
			1 => char::from_u32(0x3041 + (i % 0x60) as u32),
			_ => char::from_u32(0x4E00 + (i % 0xB00) as u32),
		})
		.collect()
}

/// Common benchmark sizes as (slots, frames per slot)
pub mod sizes {
	/// A handful of looping effects
	pub const SMALL: (usize, usize) = (8, 4);
	/// Typical track pack
	pub const MEDIUM: (usize, usize) = (64, 16);
	/// Stress case
	pub const LARGE: (usize, usize) = (512, 32);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_pack() {
		let pack = generate_pack(3, 5);
		assert_eq!(pack.slot_count(), 3);
		assert_eq!(pack.frame_count(), 15);
		assert_eq!(frame_names(3, 5).len(), 15);
	}

	#[test]
	fn test_generated_text_survives_charset() {
		let charset = generate_charset();
		let text = generate_text(256);
		let encoded = charset.encode(&text);
		assert_eq!(charset.decode(&encoded), text);
	}
}
