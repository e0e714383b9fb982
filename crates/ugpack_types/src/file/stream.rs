//! Little-endian stream helpers shared by the block codecs.
//!
//! All multi-byte values in the game's block format are little-endian. Reads
//! report short streams as [`UgFileError::Truncated`] with the number of bytes
//! that were actually available, instead of a bare `UnexpectedEof`.

use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

use super::{FileType, UgFileError};

/// Fills `buf` completely or fails with [`UgFileError::Truncated`].
pub fn read_exact<R: Read>(
	reader: &mut R,
	buf: &mut [u8],
	file_type: FileType,
) -> Result<(), UgFileError> {
	let mut filled = 0;
	while filled < buf.len() {
		match reader.read(&mut buf[filled..]) {
			Ok(0) => return Err(UgFileError::truncated(file_type, buf.len(), filled)),
			Ok(n) => filled += n,
			Err(e) if e.kind() == ErrorKind::Interrupted => {}
			Err(e) => return Err(e.into()),
		}
	}
	Ok(())
}

/// Reads a little-endian `u32`.
pub fn read_u32<R: Read>(reader: &mut R, file_type: FileType) -> Result<u32, UgFileError> {
	let mut bytes = [0u8; 4];
	read_exact(reader, &mut bytes, file_type)?;
	Ok(u32::from_le_bytes(bytes))
}

/// Reads a little-endian `i32`.
pub fn read_i32<R: Read>(reader: &mut R, file_type: FileType) -> Result<i32, UgFileError> {
	let mut bytes = [0u8; 4];
	read_exact(reader, &mut bytes, file_type)?;
	Ok(i32::from_le_bytes(bytes))
}

/// Reads a signed count or size field, clamping negative values to zero.
pub fn read_len<R: Read>(reader: &mut R, file_type: FileType) -> Result<usize, UgFileError> {
	let value = read_i32(reader, file_type)?;
	Ok(usize::try_from(value).unwrap_or(0))
}

/// Writes a little-endian `u32`.
pub fn write_u32<W: Write>(writer: &mut W, value: u32) -> Result<(), UgFileError> {
	writer.write_all(&value.to_le_bytes())?;
	Ok(())
}

/// Writes a little-endian `i32`.
pub fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<(), UgFileError> {
	writer.write_all(&value.to_le_bytes())?;
	Ok(())
}

/// Writes a count that the format stores as `i32`, saturating at `i32::MAX`.
pub fn write_len<W: Write>(writer: &mut W, value: usize) -> Result<(), UgFileError> {
	write_i32(writer, i32::try_from(value).unwrap_or(i32::MAX))
}

/// Reads a `width`-byte field holding null-terminated UTF-8 text.
///
/// Bytes after the first null are ignored; invalid UTF-8 is replaced lossily.
pub fn read_fixed_string<R: Read>(
	reader: &mut R,
	width: usize,
	file_type: FileType,
) -> Result<String, UgFileError> {
	let mut raw = vec![0u8; width];
	read_exact(reader, &mut raw, file_type)?;
	let end = raw.iter().position(|&b| b == 0).unwrap_or(width);
	Ok(String::from_utf8_lossy(&raw[..end]).into_owned())
}

/// Writes `value` into a `width`-byte null-terminated field.
///
/// Text longer than `width - 1` bytes is cut at the last character boundary that
/// still leaves room for the terminator.
pub fn write_fixed_string<W: Write>(
	writer: &mut W,
	value: &str,
	width: usize,
) -> Result<(), UgFileError> {
	let mut raw = vec![0u8; width];
	let mut len = value.len().min(width.saturating_sub(1));
	while !value.is_char_boundary(len) {
		len -= 1;
	}
	raw[..len].copy_from_slice(&value.as_bytes()[..len]);
	writer.write_all(&raw)?;
	Ok(())
}

/// Reads null-terminated UTF-8 text of any length.
pub fn read_cstring<R: Read>(reader: &mut R, file_type: FileType) -> Result<String, UgFileError> {
	let mut raw = Vec::new();
	let mut byte = [0u8; 1];
	loop {
		match read_exact(reader, &mut byte, file_type) {
			Ok(()) => {}
			Err(UgFileError::Truncated {
				..
			}) => return Err(UgFileError::truncated(file_type, raw.len() + 1, raw.len())),
			Err(e) => return Err(e),
		}
		if byte[0] == 0 {
			break;
		}
		raw.push(byte[0]);
	}
	Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Writes `value` followed by a null terminator.
pub fn write_cstring<W: Write>(writer: &mut W, value: &str) -> Result<(), UgFileError> {
	writer.write_all(value.as_bytes())?;
	writer.write_all(&[0])?;
	Ok(())
}

/// Writes `count` zero-valued `i32` fields.
pub fn write_reserved<W: Write>(writer: &mut W, count: usize) -> Result<(), UgFileError> {
	for _ in 0..count {
		write_i32(writer, 0)?;
	}
	Ok(())
}

/// Placeholder for a block size that is only known after its payload is written.
///
/// [`SizePatch::reserve`] writes a `-1` placeholder and records where it lives.
/// [`SizePatch::commit`] measures the payload written since then, seeks back to
/// overwrite the placeholder with that length, and returns the stream to the
/// end of the payload.
///
/// ```
/// use std::io::Cursor;
/// use ugpack_types::file::stream::SizePatch;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut out = Cursor::new(Vec::new());
/// let patch = SizePatch::reserve(&mut out)?;
/// std::io::Write::write_all(&mut out, &[1, 2, 3])?;
/// assert_eq!(patch.commit(&mut out)?, 3);
/// assert_eq!(out.into_inner(), vec![3, 0, 0, 0, 1, 2, 3]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "the placeholder stays at -1 until the patch is committed"]
pub struct SizePatch {
	/// Absolute offset of the 4-byte placeholder
	offset: u64,
}

impl SizePatch {
	/// Writes the placeholder at the current position.
	pub fn reserve<W: Write + Seek>(writer: &mut W) -> Result<Self, UgFileError> {
		let offset = writer.stream_position()?;
		write_i32(writer, -1)?;
		Ok(Self {
			offset,
		})
	}

	/// Absolute offset of the first payload byte.
	pub fn payload_start(&self) -> u64 {
		self.offset + 4
	}

	/// Patches the placeholder with the payload length and returns that length.
	pub fn commit<W: Write + Seek>(self, writer: &mut W) -> Result<u32, UgFileError> {
		let end = writer.stream_position()?;
		let size = end.saturating_sub(self.payload_start());
		let size = u32::try_from(size).map_err(|_| {
			std::io::Error::new(ErrorKind::InvalidData, "block payload exceeds 4 GiB")
		})?;

		writer.seek(SeekFrom::Start(self.offset))?;
		write_u32(writer, size)?;
		writer.seek(SeekFrom::Start(end))?;
		Ok(size)
	}
}
