//! Extended character set used for strings stored inside game archives.
//!
//! ASCII passes through unchanged. Everything else is looked up in a
//! 3072-entry table of UTF-16 code units that ships with each archive:
//!
//! ```text
//! Byte sequence         Meaning
//! --------------------  -------------------------------------------------
//! 0x00                  terminator
//! 0x01..=0x7F           ASCII character
//! b (>= 0x80)           table[b] >= 0x80: table[b] is the character
//! b nxt                 table[b] in 1..0x80: selector, nxt >= 0x80,
//!                       character = table[128 * table[b] - 128 + nxt]
//! ```
//!
//! A lead byte whose table entry is `0` means the table does not apply to the
//! data at all, and the whole input is read as Latin-1 instead.
//!
//! # On-disk form
//!
//! ```text
//! Offset  Size  Field        Description
//! ------  ----  -----------  ----------------------------------------
//! 0x0000  4     num_entries  Number of meaningful table entries (i32)
//! 0x0004  6144  entry_table  3072 UTF-16 code units (u16)
//! ```

use std::{
	fmt::{Display, Formatter},
	io::{Read, Write},
};

use super::{FileType, UgFileError, stream};

/// Number of entries in a charset table.
pub const ENTRY_TABLE_LEN: usize = 0xC00;

/// Code units below this value are plain ASCII.
const ASCII_LIMIT: u16 = 0x80;

/// Lead bytes live in `0x80..0x100`.
const LEAD_BYTE_END: usize = 0x100;

/// Code units from here on are never encoded.
const UNENCODABLE_FROM: u16 = 0xFF80;

/// Lookup table mapping extended characters to one- or two-byte sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
	/// Number of meaningful entries; encoding only searches below this index
	pub num_entries: i32,

	/// Character table, indices `0..0x80` are unused
	pub entry_table: Box<[u16; ENTRY_TABLE_LEN]>,
}

impl Default for Charset {
	fn default() -> Self {
		Self {
			num_entries: 0,
			entry_table: Box::new([0; ENTRY_TABLE_LEN]),
		}
	}
}

impl Charset {
	/// Serialized size of a charset in bytes.
	pub const SIZE: usize = 4 + ENTRY_TABLE_LEN * 2;

	/// Creates an empty charset.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a charset from an existing table.
	pub fn with_table(num_entries: i32, entry_table: [u16; ENTRY_TABLE_LEN]) -> Self {
		Self {
			num_entries,
			entry_table: Box::new(entry_table),
		}
	}

	/// Total serialized length, independent of `num_entries`.
	pub fn size(&self) -> usize {
		Self::SIZE
	}

	/// Loads a charset from any reader.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, UgFileError> {
		let num_entries = stream::read_i32(reader, FileType::Charset)?;

		let mut raw = vec![0u8; ENTRY_TABLE_LEN * 2];
		stream::read_exact(reader, &mut raw, FileType::Charset).map_err(|e| match e {
			UgFileError::Truncated {
				actual,
				..
			} => UgFileError::truncated(FileType::Charset, Self::SIZE, 4 + actual),
			other => other,
		})?;

		let mut charset = Self {
			num_entries,
			..Self::default()
		};
		for (entry, chunk) in charset.entry_table.iter_mut().zip(raw.chunks_exact(2)) {
			*entry = u16::from_le_bytes([chunk[0], chunk[1]]);
		}
		Ok(charset)
	}

	/// Loads a charset from a byte slice.
	pub fn from_bytes(data: &[u8]) -> Result<Self, UgFileError> {
		if data.len() < Self::SIZE {
			return Err(UgFileError::truncated(FileType::Charset, Self::SIZE, data.len()));
		}
		let mut cursor = data;
		Self::from_reader(&mut cursor)
	}

	/// Writes the charset to any writer.
	pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), UgFileError> {
		writer.write_all(&self.to_bytes())?;
		Ok(())
	}

	/// Serializes the charset to bytes.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut bytes = Vec::with_capacity(Self::SIZE);
		bytes.extend_from_slice(&self.num_entries.to_le_bytes());
		for entry in self.entry_table.iter() {
			bytes.extend_from_slice(&entry.to_le_bytes());
		}
		bytes
	}

	/// Decodes a byte string using this charset.
	///
	/// Decoding stops at the first zero byte. If a lead byte has no table entry,
	/// the entire input (terminator and trailing bytes included) is returned as
	/// Latin-1 text instead, since the table evidently does not describe it.
	/// A selector that is the last input byte, or that points past the end of
	/// the table, is handled the same way.
	pub fn decode(&self, bytes: &[u8]) -> String {
		let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
		let mut pos = 0;

		while pos < bytes.len() {
			let byte = bytes[pos];
			pos += 1;

			if byte == 0 {
				break;
			}

			if u16::from(byte) < ASCII_LIMIT {
				units.push(u16::from(byte));
				continue;
			}

			let hst = self.entry_table[usize::from(byte)];
			if hst >= ASCII_LIMIT {
				units.push(hst);
			} else if hst != 0 {
				let Some(&nxt) = bytes.get(pos) else {
					return decode_latin1(bytes);
				};
				pos += 1;

				// A low trail byte resolves to nothing
				if u16::from(nxt) >= ASCII_LIMIT {
					let index = 128 * usize::from(hst) - 128 + usize::from(nxt);
					match self.entry_table.get(index) {
						Some(&unit) => units.push(unit),
						None => return decode_latin1(bytes),
					}
				}
			} else {
				return decode_latin1(bytes);
			}
		}

		String::from_utf16_lossy(&units)
	}

	/// Encodes `text` using this charset.
	///
	/// Characters the table cannot represent are dropped silently. The output
	/// always ends with a single zero byte.
	pub fn encode(&self, text: &str) -> Vec<u8> {
		let mut bytes = Vec::with_capacity(text.len() + 1);

		for unit in text.encode_utf16() {
			if unit >= UNENCODABLE_FROM {
				continue;
			}

			if unit < ASCII_LIMIT {
				bytes.push(unit as u8);
				continue;
			}

			let Some(index) = self.find_entry(unit) else {
				continue;
			};

			if index < LEAD_BYTE_END {
				bytes.push(index as u8);
			} else if let Some(selector) = self.find_selector(index) {
				bytes.push(selector);
				// (index % 128) - 128 as a signed byte
				bytes.push((index % 128) as u8 | 0x80);
			}
		}

		bytes.push(0);
		bytes
	}

	/// First table index in `0x80..num_entries` holding `unit`.
	fn find_entry(&self, unit: u16) -> Option<usize> {
		let end = usize::try_from(self.num_entries).unwrap_or(0).min(ENTRY_TABLE_LEN);
		if end <= usize::from(ASCII_LIMIT) {
			return None;
		}
		(usize::from(ASCII_LIMIT)..end).find(|&index| self.entry_table[index] == unit)
	}

	/// First lead byte whose selector value addresses the 128-entry page of `index`.
	fn find_selector(&self, index: usize) -> Option<u8> {
		let page = index >> 7;
		(usize::from(ASCII_LIMIT)..LEAD_BYTE_END)
			.find(|&lead| usize::from(self.entry_table[lead]) == page)
			.map(|lead| lead as u8)
	}
}

fn decode_latin1(bytes: &[u8]) -> String {
	encoding_rs::mem::decode_latin1(bytes).into_owned()
}

impl Display for Charset {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "NumEntries: {}", self.num_entries)
	}
}

impl TryFrom<&[u8]> for Charset {
	type Error = UgFileError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}

impl From<&Charset> for Vec<u8> {
	fn from(charset: &Charset) -> Self {
		charset.to_bytes()
	}
}
