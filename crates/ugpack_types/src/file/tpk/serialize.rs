//! Compressed tool-internal persistence of animation packs.
//!
//! The native block must match the game engine byte for byte. The serialized
//! form only has to round-trip inside the toolkit, so it stores slots in the
//! compact record layout and compresses them:
//!
//! ```text
//! SerializationHeader | compressed_len: i32 | lz4(slot_count: i32 | compact slot × slot_count)
//! ```

use std::io::{Read, Write};

use log::{debug, warn};

use crate::{
	file::{FileType, UgFileError, stream},
	game::Game,
	hash::KeyDictionary,
};

use super::{constants, pack::AnimationPack, slot::AnimSlot};

/// Magic bytes opening a serialization header.
pub const SERIALIZATION_MAGIC: [u8; 4] = *b"SRLZ";

/// Header written in front of every serialized payload.
///
/// ```text
/// Offset  Size  Field  Description
/// ------  ----  -----  ----------------------------------------
/// 0x00    4     magic  "SRLZ"
/// 0x04    4     size   Length of the compressed payload (u32)
/// 0x08    4     game   Game identifier (u32)
/// 0x0C    n     tag    Null-terminated UTF-8 tag, usually empty
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializationHeader {
	/// Length of the compressed payload
	pub size: u32,
	/// Game the payload belongs to
	pub game: Game,
	/// Free-form tag
	pub tag: String,
}

impl SerializationHeader {
	/// Creates a header for a payload of `size` bytes.
	pub fn new(size: usize, game: Game, tag: impl Into<String>) -> Self {
		Self {
			size: u32::try_from(size).unwrap_or(u32::MAX),
			game,
			tag: tag.into(),
		}
	}

	/// Reads a header from any reader.
	///
	/// # Errors
	///
	/// - [`UgFileError::InvalidMagic`] if the magic bytes are wrong
	/// - [`UgFileError::UnknownGame`] if the game identifier is not supported
	pub fn read<R: Read>(reader: &mut R) -> Result<Self, UgFileError> {
		let mut magic = [0u8; 4];
		stream::read_exact(reader, &mut magic, FileType::SerializationHeader)?;
		if magic != SERIALIZATION_MAGIC {
			return Err(UgFileError::invalid_magic(
				FileType::SerializationHeader,
				&SERIALIZATION_MAGIC,
				&magic,
			));
		}

		let size = stream::read_u32(reader, FileType::SerializationHeader)?;
		let game = Game::from_id(stream::read_u32(reader, FileType::SerializationHeader)?)?;
		let tag = stream::read_cstring(reader, FileType::SerializationHeader)?;

		Ok(Self {
			size,
			game,
			tag,
		})
	}

	/// Writes the header to any writer.
	pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), UgFileError> {
		writer.write_all(&SERIALIZATION_MAGIC)?;
		stream::write_u32(writer, self.size)?;
		stream::write_u32(writer, self.game.id())?;
		stream::write_cstring(writer, &self.tag)
	}
}

impl AnimationPack {
	/// Reads an Underground 1 pack from its serialized form, header included.
	pub fn from_serialized<R: Read>(
		reader: &mut R,
		collection_name: impl Into<String>,
		dict: &KeyDictionary,
	) -> Result<Self, UgFileError> {
		let mut pack = Self::new(collection_name);
		pack.deserialize_with_header(reader, dict)?;
		Ok(pack)
	}

	/// Writes the pack in the compressed serialized form, header included.
	pub fn serialize<W: Write>(&self, writer: &mut W) -> Result<(), UgFileError> {
		let capacity = constants::SERIALIZED_COUNT_SIZE
			+ self.slots().iter().map(AnimSlot::serialized_size).sum::<usize>();

		let mut buffer = Vec::with_capacity(capacity);
		stream::write_len(&mut buffer, self.slot_count())?;
		for slot in self.slots() {
			slot.write_compact(&mut buffer)?;
		}

		let compressed = lz4_flex::compress_prepend_size(&buffer);
		debug!(
			"Serialized animation pack '{}': {} slots, {} -> {} bytes",
			self.collection_name(),
			self.slot_count(),
			buffer.len(),
			compressed.len()
		);

		SerializationHeader::new(compressed.len(), self.game(), String::new()).write(writer)?;
		stream::write_len(writer, compressed.len())?;
		writer.write_all(&compressed)?;
		Ok(())
	}

	/// Reads a serialized payload whose header was already consumed, replacing
	/// the slots of this pack.
	///
	/// # Errors
	///
	/// - [`UgFileError::Truncated`] if the payload is shorter than declared
	/// - [`UgFileError::Compression`] if the payload does not decompress
	pub fn deserialize<R: Read>(
		&mut self,
		reader: &mut R,
		dict: &KeyDictionary,
	) -> Result<(), UgFileError> {
		self.read_payload(reader, dict).map(|_| ())
	}

	/// Reads a header followed by a serialized payload.
	///
	/// # Errors
	///
	/// Returns [`UgFileError::GameMismatch`] if the header names another game
	/// than this pack's, plus everything [`AnimationPack::deserialize`] reports.
	pub fn deserialize_with_header<R: Read>(
		&mut self,
		reader: &mut R,
		dict: &KeyDictionary,
	) -> Result<(), UgFileError> {
		let header = SerializationHeader::read(reader)?;
		if header.game != self.game() {
			return Err(UgFileError::GameMismatch {
				expected: self.game().to_string(),
				found: header.game.to_string(),
			});
		}

		let size = self.read_payload(reader, dict)?;
		if size != header.size as usize {
			warn!(
				"Serialization header declares {} bytes but payload has {} bytes",
				header.size, size
			);
		}
		Ok(())
	}

	/// Returns the compressed payload length.
	fn read_payload<R: Read>(
		&mut self,
		reader: &mut R,
		dict: &KeyDictionary,
	) -> Result<usize, UgFileError> {
		let size = stream::read_len(reader, FileType::SerializedPack)?;

		let mut compressed = Vec::new();
		reader.by_ref().take(size as u64).read_to_end(&mut compressed)?;
		if compressed.len() < size {
			return Err(UgFileError::truncated(FileType::SerializedPack, size, compressed.len()));
		}

		// LZ4 expands each input byte to at most 255 output bytes
		let declared = compressed
			.get(..4)
			.and_then(|prefix| <[u8; 4]>::try_from(prefix).ok())
			.map_or(0, |prefix| u32::from_le_bytes(prefix) as usize);
		if declared > compressed.len().saturating_mul(constants::LZ4_MAX_RATIO) {
			return Err(UgFileError::Compression {
				file_type: FileType::SerializedPack,
				message: format!(
					"declared size {declared} is impossible for {} compressed bytes",
					compressed.len()
				),
			});
		}

		let data = lz4_flex::decompress_size_prepended(&compressed).map_err(|e| {
			UgFileError::Compression {
				file_type: FileType::SerializedPack,
				message: e.to_string(),
			}
		})?;

		let mut cursor = data.as_slice();
		let count = stream::read_len(&mut cursor, FileType::SerializedPack)?;
		let mut slots = Vec::new();
		for _ in 0..count {
			slots.push(AnimSlot::read_compact(&mut cursor, dict)?);
		}

		debug!("Deserialized animation pack: {} slots from {} bytes", slots.len(), size);
		*self.slots_mut() = slots;
		Ok(size)
	}
}
