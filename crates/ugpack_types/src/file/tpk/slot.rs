//! Animation slots and their two binary encodings.
//!
//! ## Native record (game layout, fixed size)
//!
//! ```text
//! Offset  Size  Field              Description
//! ------  ----  -----------------  ------------------------------------------
//! 0x00    0x18  name               Null-terminated UTF-8, zero padded
//! 0x18    4     key                Binary key of the name (u32)
//! 0x1C    4     frame_count        Number of frame entries owned (i32)
//! 0x20    4     frames_per_second  Playback rate (i32)
//! 0x24    4     time_base          Time base (i32)
//! 0x28    12    reserved           Runtime pointer, valid flag, current frame
//! ```
//!
//! The frame entries themselves are stored in the pack's flat frame table.
//!
//! ## Compact record (tool layout, variable size)
//!
//! ```text
//! name\0 | frame_count: i32 | frames_per_second: i32 | time_base: i32 | key: u32 × frame_count
//! ```

use std::io::{Read, Seek, SeekFrom, Write};

use serde::Serialize;

use crate::{
	file::{FileType, UgFileError, stream},
	game::Layout,
	hash::{KeyDictionary, bin_hash},
};

use super::{constants, frame::FrameEntry};

/// One named animation track of a texture animation pack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnimSlot {
	name: String,
	key: u32,

	/// Number of frames shown per second
	pub frames_per_second: i32,

	/// Time base of the animation
	pub time_base: i32,

	/// Textures cycled by this slot, in playback order
	pub frame_textures: Vec<FrameEntry>,
}

impl AnimSlot {
	/// Creates an empty slot named `name`.
	///
	/// # Errors
	///
	/// Returns [`UgFileError::Validation`] if the name is empty or contains whitespace.
	pub fn new(name: &str) -> Result<Self, UgFileError> {
		let mut slot = Self::default();
		slot.set_name(name)?;
		Ok(slot)
	}

	/// Slot name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Binary key of the slot name.
	pub fn key(&self) -> u32 {
		self.key
	}

	/// Renames the slot and recomputes its key.
	///
	/// The slot is left untouched when validation fails.
	///
	/// # Errors
	///
	/// Returns [`UgFileError::Validation`] if the name is empty or contains
	/// whitespace or control characters.
	///
	/// # Examples
	///
	/// ```
	/// use ugpack_types::file::tpk::AnimSlot;
	///
	/// let mut slot = AnimSlot::new("fire").unwrap();
	/// assert!(slot.set_name("my name").is_err());
	/// assert_eq!(slot.name(), "fire");
	/// ```
	pub fn set_name(&mut self, name: &str) -> Result<(), UgFileError> {
		if name.trim().is_empty() {
			return Err(UgFileError::validation("slot name cannot be left empty"));
		}
		if name.chars().any(char::is_whitespace) {
			return Err(UgFileError::validation(format!(
				"slot name '{name}' cannot contain whitespace"
			)));
		}
		if name.chars().any(char::is_control) {
			return Err(UgFileError::validation(format!(
				"slot name {name:?} cannot contain control characters"
			)));
		}

		self.name = name.to_string();
		self.key = bin_hash(name);
		Ok(())
	}

	/// Appends a frame texture by name.
	pub fn add_frame(&mut self, texture: impl Into<String>) {
		self.frame_textures.push(FrameEntry::new(texture));
	}

	/// Number of frame textures.
	pub fn frame_count(&self) -> usize {
		self.frame_textures.len()
	}

	/// Reads a native slot record.
	///
	/// Returns the slot together with the frame count declared in the record,
	/// which the pack codec uses to split the flat frame table. The stream is
	/// always left at the end of the record.
	pub fn read_native<R: Read + Seek>(
		reader: &mut R,
		layout: &Layout,
	) -> Result<(Self, usize), UgFileError> {
		let start = reader.stream_position()?;

		let name = stream::read_fixed_string(reader, layout.slot_name_width, FileType::AnimationSlot)?;
		let key = stream::read_u32(reader, FileType::AnimationSlot)?;
		let declared_frames = stream::read_len(reader, FileType::AnimationSlot)?;
		let frames_per_second = stream::read_i32(reader, FileType::AnimationSlot)?;
		let time_base = stream::read_i32(reader, FileType::AnimationSlot)?;

		reader.seek(SeekFrom::Start(start + layout.slot_size as u64))?;

		let slot = Self {
			name,
			key,
			frames_per_second,
			time_base,
			frame_textures: Vec::new(),
		};
		Ok((slot, declared_frames))
	}

	/// Writes a native slot record.
	pub fn write_native<W: Write>(&self, writer: &mut W, layout: &Layout) -> Result<(), UgFileError> {
		stream::write_fixed_string(writer, &self.name, layout.slot_name_width)?;
		stream::write_u32(writer, self.key)?;
		stream::write_len(writer, self.frame_textures.len())?;
		stream::write_i32(writer, self.frames_per_second)?;
		stream::write_i32(writer, self.time_base)?;
		stream::write_reserved(writer, constants::SLOT_RESERVED_FIELDS)
	}

	/// Reads a compact slot record, resolving frame names through `dict`.
	pub fn read_compact<R: Read>(reader: &mut R, dict: &KeyDictionary) -> Result<Self, UgFileError> {
		let name = stream::read_cstring(reader, FileType::SerializedPack)?;
		let count = stream::read_len(reader, FileType::SerializedPack)?;
		let frames_per_second = stream::read_i32(reader, FileType::SerializedPack)?;
		let time_base = stream::read_i32(reader, FileType::SerializedPack)?;

		let mut frame_textures = Vec::new();
		for _ in 0..count {
			let key = stream::read_u32(reader, FileType::SerializedPack)?;
			frame_textures.push(FrameEntry::from_key(key, dict));
		}

		Ok(Self {
			key: bin_hash(&name),
			name,
			frames_per_second,
			time_base,
			frame_textures,
		})
	}

	/// Writes a compact slot record.
	pub fn write_compact<W: Write>(&self, writer: &mut W) -> Result<(), UgFileError> {
		stream::write_cstring(writer, &self.name)?;
		stream::write_len(writer, self.frame_textures.len())?;
		stream::write_i32(writer, self.frames_per_second)?;
		stream::write_i32(writer, self.time_base)?;
		for frame in &self.frame_textures {
			stream::write_u32(writer, frame.key())?;
		}
		Ok(())
	}

	/// Estimated size of the compact record, used to pre-size buffers.
	pub fn serialized_size(&self) -> usize {
		self.name.len()
			+ constants::COMPACT_SLOT_FIXED_SIZE
			+ self.frame_textures.len() * constants::COMPACT_FRAME_SIZE
	}
}

impl std::fmt::Display for AnimSlot {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name)
	}
}
