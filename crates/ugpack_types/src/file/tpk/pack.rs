//! Texture animation pack and its native block codec.

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use log::{debug, warn};
use serde::Serialize;

use crate::{
	file::{
		FileType, UgFileError,
		stream::{self, SizePatch},
	},
	game::{Game, Layout},
	hash::KeyDictionary,
};

use super::{constants, frame::FrameEntry, slot::AnimSlot};

/// A pack of animation slots, stored in game archives as one nested block.
///
/// # Block Structure
///
/// ```text
/// pack block      tag | size | payload
///   header        tag | 0x10 | version, 3 × reserved
///   slots         tag | n × 0x34 | n native slot records
///   frames        tag | m × 0x10 | m × (key, 3 × reserved)
/// ```
///
/// The frame table is flat: slot boundaries are not stored and are rebuilt
/// from the frame count each slot record declares.
///
/// # Examples
///
/// ```
/// use ugpack_types::{
/// 	file::tpk::{AnimSlot, AnimationPack},
/// 	hash::KeyDictionary,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut pack = AnimationPack::new("GLOBAL_ANIMS");
/// let mut slot = AnimSlot::new("fire")?;
/// slot.frames_per_second = 30;
/// slot.add_frame("tex1");
/// pack.add_slot(slot);
///
/// let bytes = pack.to_bytes()?;
/// let dict = KeyDictionary::from_names(["tex1"]);
/// let loaded = AnimationPack::from_bytes(&bytes, &dict)?;
/// assert_eq!(loaded.slots()[0].frame_textures[0].name(), "tex1");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimationPack {
	collection_name: String,
	#[serde(serialize_with = "serialize_game")]
	game: Game,
	version: i32,
	slots: Vec<AnimSlot>,
}

fn serialize_game<S: serde::Serializer>(game: &Game, serializer: S) -> Result<S::Ok, S::Error> {
	serializer.serialize_str(game.as_str())
}

impl Default for AnimationPack {
	fn default() -> Self {
		Self {
			collection_name: String::new(),
			game: Game::default(),
			version: constants::DEFAULT_VERSION,
			slots: Vec::new(),
		}
	}
}

impl AnimationPack {
	/// Creates an empty Underground 1 pack.
	pub fn new(collection_name: impl Into<String>) -> Self {
		Self::with_game(collection_name, Game::Underground1)
	}

	/// Creates an empty pack for `game`.
	pub fn with_game(collection_name: impl Into<String>, game: Game) -> Self {
		Self {
			collection_name: collection_name.into(),
			game,
			..Self::default()
		}
	}

	/// Reads an Underground 1 pack block from `reader`.
	pub fn from_reader<R: Read + Seek>(
		reader: &mut R,
		dict: &KeyDictionary,
	) -> Result<Self, UgFileError> {
		let mut pack = Self::default();
		pack.disassemble(reader, dict)?;
		Ok(pack)
	}

	/// Reads an Underground 1 pack block from a byte slice.
	pub fn from_bytes(data: &[u8], dict: &KeyDictionary) -> Result<Self, UgFileError> {
		Self::from_reader(&mut Cursor::new(data), dict)
	}

	/// Assembles the pack into a standalone block.
	pub fn to_bytes(&self) -> Result<Vec<u8>, UgFileError> {
		let mut cursor = Cursor::new(Vec::new());
		self.assemble(&mut cursor)?;
		Ok(cursor.into_inner())
	}

	/// Name of the collection owning this pack.
	pub fn collection_name(&self) -> &str {
		&self.collection_name
	}

	/// Renames the collection.
	pub fn set_collection_name(&mut self, name: impl Into<String>) {
		self.collection_name = name.into();
	}

	/// Game whose layout this pack uses.
	pub fn game(&self) -> Game {
		self.game
	}

	/// Binary constants of the pack's game.
	pub fn layout(&self) -> &'static Layout {
		self.game.layout()
	}

	/// Format version stored in the pack header.
	pub fn version(&self) -> i32 {
		self.version
	}

	/// Sets the format version stored in the pack header.
	pub fn set_version(&mut self, version: i32) {
		self.version = version;
	}

	/// Animation slots in on-disk order.
	pub fn slots(&self) -> &[AnimSlot] {
		&self.slots
	}

	/// Mutable access to the animation slots.
	pub fn slots_mut(&mut self) -> &mut Vec<AnimSlot> {
		&mut self.slots
	}

	/// Number of animation slots.
	pub fn slot_count(&self) -> usize {
		self.slots.len()
	}

	/// Total number of frame entries across all slots.
	pub fn frame_count(&self) -> usize {
		self.slots.iter().map(AnimSlot::frame_count).sum()
	}

	/// Appends a slot.
	pub fn add_slot(&mut self, slot: AnimSlot) {
		self.slots.push(slot);
	}

	/// Finds the first slot with `key`.
	pub fn find_slot(&self, key: u32) -> Option<&AnimSlot> {
		self.slots.iter().find(|slot| slot.key() == key)
	}

	/// Finds the first slot with `key` for modification.
	pub fn find_slot_mut(&mut self, key: u32) -> Option<&mut AnimSlot> {
		self.slots.iter_mut().find(|slot| slot.key() == key)
	}

	/// Removes the first slot with `key`.
	pub fn remove_slot(&mut self, key: u32) -> Option<AnimSlot> {
		let pos = self.slots.iter().position(|slot| slot.key() == key)?;
		Some(self.slots.remove(pos))
	}

	/// Writes the pack block at the current stream position.
	///
	/// The outer block size is patched in once the payload is written; the
	/// stream is left just past the block.
	pub fn assemble<W: Write + Seek>(&self, writer: &mut W) -> Result<(), UgFileError> {
		let layout = self.layout();
		let ids = &layout.block_ids;

		stream::write_u32(writer, ids.pack)?;
		let patch = SizePatch::reserve(writer)?;

		// Part 1: header
		stream::write_u32(writer, ids.header)?;
		stream::write_len(writer, layout.header_size)?;
		stream::write_i32(writer, self.version)?;
		stream::write_reserved(writer, constants::HEADER_RESERVED_FIELDS)?;

		// Part 2: slot records
		stream::write_u32(writer, ids.slots)?;
		stream::write_len(writer, self.slots.len() * layout.slot_size)?;

		let mut total_frames = 0;
		for slot in &self.slots {
			slot.write_native(writer, layout)?;
			total_frames += slot.frame_count();
		}

		// Part 3: flat frame table, slot order then frame order
		stream::write_u32(writer, ids.frames)?;
		stream::write_len(writer, total_frames * layout.frame_entry_size)?;

		for frame in self.slots.iter().flat_map(|slot| slot.frame_textures.iter()) {
			stream::write_u32(writer, frame.key())?;
			stream::write_reserved(writer, constants::FRAME_RESERVED_FIELDS)?;
		}

		let size = patch.commit(writer)?;
		debug!(
			"Assembled animation pack '{}': {} slots, {} frames, {} bytes",
			self.collection_name,
			self.slots.len(),
			total_frames,
			size
		);
		Ok(())
	}

	/// Reads a pack block at the current stream position, replacing the version
	/// and slots of this pack.
	///
	/// Frame entries are handed out to slots in order, each slot taking as many
	/// as its record declared. Disagreeing counts are tolerated: distribution
	/// stops when either entries or slots run out, and the stream is always left
	/// at the end of the outer block.
	///
	/// Once a slot is full, every following slot that is also full (including
	/// slots declaring zero frames) is skipped before the next entry is placed.
	/// Advancing a single slot at a time would hand the next entry to an empty
	/// slot and shift every later frame by one.
	///
	/// # Errors
	///
	/// - [`UgFileError::InvalidTag`] if a block tag does not match the layout
	/// - [`UgFileError::Truncated`] if the stream ends inside a record
	pub fn disassemble<R: Read + Seek>(
		&mut self,
		reader: &mut R,
		dict: &KeyDictionary,
	) -> Result<(), UgFileError> {
		let layout = self.layout();
		let ids = &layout.block_ids;

		let pack_size = read_block_header(reader, ids.pack)?;
		let end = reader.stream_position()? + pack_size as u64;

		// Part 1: header, only the version is meaningful
		let header_size = read_block_header(reader, ids.header)?;
		let header_start = reader.stream_position()?;
		let version = stream::read_i32(reader, FileType::AnimationPack)?;
		reader.seek(SeekFrom::Start(header_start + header_size as u64))?;

		// Part 2: slot records
		let slots_size = read_block_header(reader, ids.slots)?;
		let slot_count = slots_size / layout.slot_size;

		// Counts come straight from the stream, so nothing is reserved up front
		let mut slots = Vec::new();
		let mut declared = Vec::new();
		for _ in 0..slot_count {
			let (slot, frames) = AnimSlot::read_native(reader, layout)?;
			slots.push(slot);
			declared.push(frames);
		}

		// Part 3: flat frame table
		let frames_size = read_block_header(reader, ids.frames)?;
		let entry_count = frames_size / layout.frame_entry_size;
		let skip = (layout.frame_entry_size - 4) as i64;

		let mut slot = 0;
		let mut count = 0;
		let mut consumed = 0;
		let mut assigned = 0;
		while consumed < entry_count && slot < slots.len() {
			let key = stream::read_u32(reader, FileType::AnimationPack)?;
			reader.seek(SeekFrom::Current(skip))?;
			consumed += 1;

			// Move past full slots, including ones that declared no frames
			while slot < slots.len() && count >= declared[slot] {
				slot += 1;
				count = 0;
			}
			let Some(target) = slots.get_mut(slot) else {
				break;
			};

			target.frame_textures.push(FrameEntry::from_key(key, dict));
			assigned += 1;
			count += 1;
		}

		let declared_total: usize = declared.iter().sum();
		if assigned != entry_count || assigned != declared_total {
			warn!(
				"Animation pack frame table mismatch: {entry_count} entries, {declared_total} declared by slots, {assigned} assigned"
			);
		}

		reader.seek(SeekFrom::Start(end))?;
		debug!("Disassembled animation pack: {} slots, {} frames", slots.len(), assigned);

		self.version = version;
		self.slots = slots;
		Ok(())
	}
}

/// Reads a block tag and size, checking the tag against `expected`.
fn read_block_header<R: Read>(reader: &mut R, expected: u32) -> Result<usize, UgFileError> {
	let tag = stream::read_u32(reader, FileType::AnimationPack)?;
	if tag != expected {
		return Err(UgFileError::invalid_tag(FileType::AnimationPack, expected, tag));
	}
	stream::read_len(reader, FileType::AnimationPack)
}

impl std::fmt::Display for AnimationPack {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Animation pack '{}' ({}, version {}, {} slots)",
			self.collection_name,
			self.game,
			self.version,
			self.slots.len()
		)
	}
}
