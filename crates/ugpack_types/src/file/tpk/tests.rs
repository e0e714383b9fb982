//! Pack-level tests for the native block codec and the serialized form.

use std::io::{Cursor, Seek, SeekFrom, Write};

use super::*;
use crate::{
	file::{FileType, UgFileError},
	game::UNDERGROUND1_LAYOUT,
	hash::{KeyDictionary, bin_hash},
};

fn slot(name: &str, fps: i32, frames: &[&str]) -> AnimSlot {
	let mut slot = AnimSlot::new(name).unwrap();
	slot.frames_per_second = fps;
	for frame in frames {
		slot.add_frame(*frame);
	}
	slot
}

fn fire_and_smoke() -> AnimationPack {
	let mut pack = AnimationPack::new("TRACK_ANIMS");
	pack.add_slot(slot("fire", 30, &["tex1", "tex2"]));
	pack.add_slot(slot("smoke", 15, &["tex3"]));
	pack
}

fn dict() -> KeyDictionary {
	KeyDictionary::from_names(["tex1", "tex2", "tex3", "tex4"])
}

fn frame_names(slot: &AnimSlot) -> Vec<&str> {
	slot.frame_textures.iter().map(FrameEntry::name).collect()
}

/// Builds a native pack block by hand, with `slack` padding bytes at the end of the payload.
fn raw_pack(slots: &[(&str, i32)], keys: &[u32], slack: usize) -> Vec<u8> {
	let ids = UNDERGROUND1_LAYOUT.block_ids;
	let mut payload = Vec::new();

	payload.extend_from_slice(&ids.header.to_le_bytes());
	payload.extend_from_slice(&0x10i32.to_le_bytes());
	payload.extend_from_slice(&1i32.to_le_bytes());
	payload.extend_from_slice(&[0u8; 12]);

	payload.extend_from_slice(&ids.slots.to_le_bytes());
	payload.extend_from_slice(&((slots.len() * 0x34) as i32).to_le_bytes());
	for (name, declared) in slots {
		let mut raw_name = [0u8; 0x18];
		raw_name[..name.len()].copy_from_slice(name.as_bytes());
		payload.extend_from_slice(&raw_name);
		payload.extend_from_slice(&bin_hash(name).to_le_bytes());
		payload.extend_from_slice(&declared.to_le_bytes());
		payload.extend_from_slice(&30i32.to_le_bytes());
		payload.extend_from_slice(&0i32.to_le_bytes());
		payload.extend_from_slice(&[0u8; 12]);
	}

	payload.extend_from_slice(&ids.frames.to_le_bytes());
	payload.extend_from_slice(&((keys.len() * 0x10) as i32).to_le_bytes());
	for key in keys {
		payload.extend_from_slice(&key.to_le_bytes());
		payload.extend_from_slice(&[0u8; 12]);
	}
	payload.extend(std::iter::repeat_n(0u8, slack));

	let mut block = Vec::new();
	block.extend_from_slice(&ids.pack.to_le_bytes());
	block.extend_from_slice(&(payload.len() as i32).to_le_bytes());
	block.extend_from_slice(&payload);
	block
}

#[test]
fn test_fire_and_smoke_roundtrip() {
	let pack = fire_and_smoke();
	let bytes = pack.to_bytes().unwrap();
	let loaded = AnimationPack::from_bytes(&bytes, &dict()).unwrap();

	assert_eq!(loaded.slot_count(), 2);
	assert_eq!(loaded.frame_count(), 3);
	assert_eq!(loaded.slots()[0].name(), "fire");
	assert_eq!(loaded.slots()[1].name(), "smoke");
	assert_eq!(frame_names(&loaded.slots()[0]), ["tex1", "tex2"]);
	assert_eq!(frame_names(&loaded.slots()[1]), ["tex3"]);
	assert_eq!(loaded.slots()[0].frames_per_second, 30);
	assert_eq!(loaded.slots()[1].frames_per_second, 15);
	assert_eq!(loaded.slots(), pack.slots());
}

#[test]
fn test_assembled_block_layout() {
	let ids = UNDERGROUND1_LAYOUT.block_ids;
	let bytes = fire_and_smoke().to_bytes().unwrap();

	// 8 outer + 24 header + (8 + 2 × 0x34) slots + (8 + 3 × 0x10) frames
	assert_eq!(bytes.len(), 200);
	assert_eq!(&bytes[0..4], &ids.pack.to_le_bytes());
	assert_eq!(&bytes[4..8], &192u32.to_le_bytes());

	assert_eq!(&bytes[8..12], &ids.header.to_le_bytes());
	assert_eq!(&bytes[12..16], &0x10u32.to_le_bytes());
	assert_eq!(&bytes[16..20], &1i32.to_le_bytes());
	assert!(bytes[20..32].iter().all(|&b| b == 0));

	assert_eq!(&bytes[32..36], &ids.slots.to_le_bytes());
	assert_eq!(&bytes[36..40], &(2u32 * 0x34).to_le_bytes());
	assert_eq!(&bytes[40..44], b"fire");

	assert_eq!(&bytes[0x90..0x94], &ids.frames.to_le_bytes());
	assert_eq!(&bytes[0x94..0x98], &48u32.to_le_bytes());
	assert_eq!(&bytes[0x98..0x9C], &bin_hash("tex1").to_le_bytes());
	assert_eq!(&bytes[0xA8..0xAC], &bin_hash("tex2").to_le_bytes());
	assert_eq!(&bytes[0xB8..0xBC], &bin_hash("tex3").to_le_bytes());
}

#[test]
fn test_assemble_mid_stream() {
	let pack = fire_and_smoke();
	let mut cursor = Cursor::new(Vec::new());
	cursor.write_all(&[0xEE; 16]).unwrap();

	pack.assemble(&mut cursor).unwrap();
	assert_eq!(cursor.position(), 16 + 200);
	cursor.write_all(b"NEXT").unwrap();

	cursor.seek(SeekFrom::Start(16)).unwrap();
	let mut loaded = AnimationPack::new("TRACK_ANIMS");
	loaded.disassemble(&mut cursor, &dict()).unwrap();
	assert_eq!(cursor.position(), 16 + 200);
	assert_eq!(loaded, pack);
}

#[test]
fn test_empty_pack_roundtrip() {
	let pack = AnimationPack::new("EMPTY");
	let bytes = pack.to_bytes().unwrap();
	assert_eq!(bytes.len(), 8 + 24 + 8 + 8);

	let loaded = AnimationPack::from_bytes(&bytes, &dict()).unwrap();
	assert_eq!(loaded.slot_count(), 0);
	assert_eq!(loaded.version(), 1);
}

#[test]
fn test_slots_without_frames_roundtrip() {
	let mut pack = AnimationPack::new("ANIMS");
	pack.add_slot(slot("idle", 1, &[]));
	pack.add_slot(slot("fire", 30, &["tex1"]));
	pack.add_slot(slot("blank", 1, &[]));
	pack.add_slot(slot("smoke", 15, &["tex2", "tex3"]));
	pack.add_slot(slot("tail", 1, &[]));

	let bytes = pack.to_bytes().unwrap();
	let loaded = AnimationPack::from_bytes(&bytes, &dict()).unwrap();
	assert_eq!(loaded.slots(), pack.slots());
}

#[test]
fn test_version_roundtrip() {
	let mut pack = fire_and_smoke();
	pack.set_version(7);
	let loaded = AnimationPack::from_bytes(&pack.to_bytes().unwrap(), &dict()).unwrap();
	assert_eq!(loaded.version(), 7);
}

#[test]
fn test_unresolved_frames_keep_keys() {
	let pack = fire_and_smoke();
	let loaded = AnimationPack::from_bytes(&pack.to_bytes().unwrap(), &KeyDictionary::new()).unwrap();

	let keys: Vec<u32> = loaded.slots()[0].frame_textures.iter().map(FrameEntry::key).collect();
	assert_eq!(keys, [bin_hash("tex1"), bin_hash("tex2")]);
	assert_eq!(frame_names(&loaded.slots()[0]), ["", ""]);

	// reassembling without names reproduces the original block
	assert_eq!(loaded.to_bytes().unwrap(), pack.to_bytes().unwrap());
}

#[test]
fn test_disassemble_skips_payload_slack() {
	let mut data = raw_pack(&[("fire", 1)], &[bin_hash("tex1")], 24);
	let block_len = data.len();
	data.extend_from_slice(b"TAIL");

	let mut cursor = Cursor::new(data);
	let pack = AnimationPack::from_reader(&mut cursor, &dict()).unwrap();
	assert_eq!(cursor.position(), block_len as u64);
	assert_eq!(frame_names(&pack.slots()[0]), ["tex1"]);
}

#[test_log::test]
fn test_extra_frame_entries_are_ignored() {
	let keys = [bin_hash("tex1"), bin_hash("tex2"), bin_hash("tex3")];
	let data = raw_pack(&[("fire", 1), ("smoke", 1)], &keys, 0);

	let mut cursor = Cursor::new(data);
	let pack = AnimationPack::from_reader(&mut cursor, &dict()).unwrap();
	assert_eq!(frame_names(&pack.slots()[0]), ["tex1"]);
	assert_eq!(frame_names(&pack.slots()[1]), ["tex2"]);
	assert_eq!(cursor.position(), cursor.get_ref().len() as u64);
}

#[test_log::test]
fn test_missing_frame_entries_stop_early() {
	let keys = [bin_hash("tex1"), bin_hash("tex2"), bin_hash("tex3")];
	let data = raw_pack(&[("fire", 2), ("smoke", 3)], &keys, 0);

	let pack = AnimationPack::from_bytes(&data, &dict()).unwrap();
	assert_eq!(frame_names(&pack.slots()[0]), ["tex1", "tex2"]);
	assert_eq!(frame_names(&pack.slots()[1]), ["tex3"]);
}

#[test_log::test]
fn test_oversized_declared_frame_count() {
	let mut pack = AnimationPack::new("ANIMS");
	pack.add_slot(slot("fire", 30, &["tex1"]));
	let mut data = pack.to_bytes().unwrap();

	// frame count field of the first slot record
	let count_at = 0x28 + 0x1C;
	assert_eq!(&data[count_at..count_at + 4], &1i32.to_le_bytes());
	data[count_at..count_at + 4].copy_from_slice(&i32::MAX.to_le_bytes());

	let mut cursor = Cursor::new(data);
	let loaded = AnimationPack::from_reader(&mut cursor, &dict()).unwrap();
	assert_eq!(frame_names(&loaded.slots()[0]), ["tex1"]);
	assert_eq!(cursor.position(), cursor.get_ref().len() as u64);
}

#[test]
fn test_oversized_slot_table_is_truncated() {
	let mut pack = AnimationPack::new("ANIMS");
	pack.add_slot(slot("fire", 30, &["tex1"]));
	let mut data = pack.to_bytes().unwrap();

	// slot table size, far larger than the stream
	data[0x24..0x28].copy_from_slice(&i32::MAX.to_le_bytes());

	let err = AnimationPack::from_bytes(&data, &dict()).unwrap_err();
	assert!(matches!(
		err,
		UgFileError::Truncated {
			file_type: FileType::AnimationSlot,
			..
		}
	));
}

#[test]
fn test_control_character_names_are_rejected() {
	assert!(AnimSlot::new("a\0b").is_err());

	let mut pack = AnimationPack::new("ANIMS");
	pack.add_slot(slot("fire", 30, &["tex1"]));
	assert!(pack.slots_mut()[0].set_name("fi\0re").is_err());

	let mut out = Vec::new();
	pack.serialize(&mut out).unwrap();
	let loaded = AnimationPack::from_serialized(&mut out.as_slice(), "ANIMS", &dict()).unwrap();
	assert_eq!(loaded, pack);
}

#[test_log::test]
fn test_frame_entries_without_slots() {
	let data = raw_pack(&[], &[bin_hash("tex1")], 0);
	let pack = AnimationPack::from_bytes(&data, &dict()).unwrap();
	assert_eq!(pack.slot_count(), 0);
}

#[test]
fn test_invalid_pack_tag() {
	let mut data = fire_and_smoke().to_bytes().unwrap();
	data[0..4].copy_from_slice(&0x1234_5678u32.to_le_bytes());

	let err = AnimationPack::from_bytes(&data, &dict()).unwrap_err();
	match err {
		UgFileError::InvalidTag {
			file_type,
			expected,
			found,
		} => {
			assert_eq!(file_type, FileType::AnimationPack);
			assert_eq!(expected, UNDERGROUND1_LAYOUT.block_ids.pack);
			assert_eq!(found, 0x1234_5678);
		}
		_ => panic!("Unexpected error: {err:?}"),
	}
}

#[test]
fn test_invalid_sub_block_tag() {
	let mut data = fire_and_smoke().to_bytes().unwrap();
	data[0x90..0x94].copy_from_slice(&UNDERGROUND1_LAYOUT.block_ids.slots.to_le_bytes());

	let err = AnimationPack::from_bytes(&data, &dict()).unwrap_err();
	assert!(matches!(
		err,
		UgFileError::InvalidTag {
			expected: 0x3030_0103,
			found: 0x3030_0102,
			..
		}
	));
}

#[test]
fn test_truncated_block() {
	let data = fire_and_smoke().to_bytes().unwrap();
	let err = AnimationPack::from_bytes(&data[..100], &dict()).unwrap_err();
	assert!(matches!(
		err,
		UgFileError::Truncated {
			file_type: FileType::AnimationSlot,
			..
		}
	));
}

#[test]
fn test_serialize_roundtrip() {
	let pack = fire_and_smoke();
	let mut out = Vec::new();
	pack.serialize(&mut out).unwrap();

	let mut cursor = Cursor::new(out);
	let header = SerializationHeader::read(&mut cursor).unwrap();
	assert_eq!(header.game, pack.game());
	assert!(header.tag.is_empty());

	let mut loaded = AnimationPack::new("TRACK_ANIMS");
	loaded.deserialize(&mut cursor, &dict()).unwrap();
	assert_eq!(loaded.slots(), pack.slots());
	assert_eq!(cursor.position(), cursor.get_ref().len() as u64);
}

#[test]
fn test_deserialize_with_header() {
	let pack = fire_and_smoke();
	let mut out = Vec::new();
	pack.serialize(&mut out).unwrap();

	let mut loaded = AnimationPack::new("TRACK_ANIMS");
	loaded.deserialize_with_header(&mut Cursor::new(out), &dict()).unwrap();
	assert_eq!(loaded, pack);
}

#[test]
fn test_from_serialized() {
	let pack = fire_and_smoke();
	let mut out = Vec::new();
	pack.serialize(&mut out).unwrap();

	let loaded = AnimationPack::from_serialized(&mut out.as_slice(), "TRACK_ANIMS", &dict()).unwrap();
	assert_eq!(loaded, pack);
}

#[test]
fn test_deserialize_replaces_slots() {
	let mut out = Vec::new();
	fire_and_smoke().serialize(&mut out).unwrap();

	let mut loaded = AnimationPack::new("TRACK_ANIMS");
	loaded.add_slot(slot("stale", 1, &["tex4"]));
	loaded.deserialize_with_header(&mut Cursor::new(out), &dict()).unwrap();
	assert_eq!(loaded.slot_count(), 2);
	assert!(loaded.find_slot(bin_hash("stale")).is_none());
}

#[test]
fn test_deserialize_truncated_payload() {
	let mut data = Vec::new();
	data.extend_from_slice(&100i32.to_le_bytes());
	data.extend_from_slice(&[0u8; 10]);

	let mut pack = AnimationPack::new("X");
	let err = pack.deserialize(&mut Cursor::new(data), &dict()).unwrap_err();
	assert!(matches!(
		err,
		UgFileError::Truncated {
			file_type: FileType::SerializedPack,
			expected: 100,
			actual: 10,
		}
	));
}

#[test]
fn test_deserialize_corrupt_payload() {
	let mut data = Vec::new();
	data.extend_from_slice(&5i32.to_le_bytes());
	// claims 10 decompressed bytes, then a literal run that never arrives
	data.extend_from_slice(&[10, 0, 0, 0, 0xF0]);

	let mut pack = AnimationPack::new("X");
	let err = pack.deserialize(&mut Cursor::new(data), &dict()).unwrap_err();
	assert!(matches!(
		err,
		UgFileError::Compression {
			..
		}
	));
}

#[test]
fn test_deserialize_rejects_impossible_size_prefix() {
	let mut data = Vec::new();
	data.extend_from_slice(&5i32.to_le_bytes());
	// claims 4 GiB of output from a single byte
	data.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF, 0x00]);

	let mut pack = AnimationPack::new("X");
	let err = pack.deserialize(&mut Cursor::new(data), &dict()).unwrap_err();
	assert!(matches!(
		err,
		UgFileError::Compression {
			file_type: FileType::SerializedPack,
			..
		}
	));
}

#[test]
fn test_slot_lookup_and_removal() {
	let mut pack = fire_and_smoke();
	assert_eq!(pack.find_slot(bin_hash("smoke")).unwrap().frames_per_second, 15);

	pack.find_slot_mut(bin_hash("fire")).unwrap().time_base = 3;
	assert_eq!(pack.slots()[0].time_base, 3);

	let removed = pack.remove_slot(bin_hash("fire")).unwrap();
	assert_eq!(removed.name(), "fire");
	assert_eq!(pack.slot_count(), 1);
	assert!(pack.remove_slot(bin_hash("fire")).is_none());
}
