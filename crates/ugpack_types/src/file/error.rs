//! Error types for file format parsing and manipulation.

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Kind of data an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
	/// Native texture animation pack block
	AnimationPack,
	/// Single animation slot record
	AnimationSlot,
	/// Compressed tool-internal pack payload
	SerializedPack,
	/// Serialization header in front of a compressed payload
	SerializationHeader,
	/// Extended character set table
	Charset,
}

impl Display for FileType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			FileType::AnimationPack => write!(f, "TPK animation pack"),
			FileType::AnimationSlot => write!(f, "TPK animation slot"),
			FileType::SerializedPack => write!(f, "serialized animation pack"),
			FileType::SerializationHeader => write!(f, "serialization header"),
			FileType::Charset => write!(f, "charset"),
		}
	}
}

/// Unified error type for every codec in this crate.
#[derive(Debug, Error)]
pub enum UgFileError {
	/// The stream ended before a fixed-size field was complete
	#[error("{file_type}: truncated data, expected {expected} bytes, got {actual} bytes")]
	Truncated {
		/// Source of the data
		file_type: FileType,
		/// Number of bytes the field needs
		expected: usize,
		/// Number of bytes that were available
		actual: usize,
	},

	/// A block tag did not match the constant the layout expects
	#[error("{file_type}: invalid block tag 0x{found:08X}, expected 0x{expected:08X}")]
	InvalidTag {
		/// Source of the data
		file_type: FileType,
		/// Tag required at this position
		expected: u32,
		/// Tag actually read
		found: u32,
	},

	/// A value was rejected by a validated setter
	#[error("Validation failed: {message}")]
	Validation {
		/// Description of the rejected value
		message: String,
	},

	/// Invalid magic number
	#[error("{file_type}: invalid magic number, expected {expected:02X?}, got {actual:02X?}")]
	InvalidMagic {
		/// Source of the data
		file_type: FileType,
		/// Expected magic bytes
		expected: Vec<u8>,
		/// Magic bytes that were read
		actual: Vec<u8>,
	},

	/// Game identifier not known to this crate
	#[error("Unknown game identifier {0}")]
	UnknownGame(u32),

	/// Serialized data belongs to another game than the one requested
	#[error("Game mismatch: expected {expected}, found {found}")]
	GameMismatch {
		/// Game of the receiving pack
		expected: String,
		/// Game recorded in the header
		found: String,
	},

	/// Compressed payload could not be decompressed
	#[error("{file_type}: decompression failed: {message}")]
	Compression {
		/// Source of the data
		file_type: FileType,
		/// Error reported by the decompressor
		message: String,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl UgFileError {
	/// Creates a [`UgFileError::Truncated`] error.
	pub fn truncated(file_type: FileType, expected: usize, actual: usize) -> Self {
		Self::Truncated {
			file_type,
			expected,
			actual,
		}
	}

	/// Creates a [`UgFileError::InvalidTag`] error.
	pub fn invalid_tag(file_type: FileType, expected: u32, found: u32) -> Self {
		Self::InvalidTag {
			file_type,
			expected,
			found,
		}
	}

	/// Creates a [`UgFileError::Validation`] error.
	pub fn validation(message: impl Into<String>) -> Self {
		Self::Validation {
			message: message.into(),
		}
	}

	/// Creates a [`UgFileError::InvalidMagic`] error.
	pub fn invalid_magic(file_type: FileType, expected: &[u8], actual: &[u8]) -> Self {
		Self::InvalidMagic {
			file_type,
			expected: expected.to_vec(),
			actual: actual.to_vec(),
		}
	}
}
