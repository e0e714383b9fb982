//! Name hashing used to derive the binary keys of every named entity.
//!
//! The game identifies textures, slots and collections by a 32-bit hash of
//! their name rather than by the name itself, so decoding a block only yields
//! keys. [`KeyDictionary`] keeps the names seen so far to map keys back.

use std::{collections::HashMap, io::BufRead};

/// Initial value of the hash accumulator.
const HASH_SEED: u32 = 0xFFFF_FFFF;

/// Multiplier applied per input byte.
const HASH_MULTIPLIER: u32 = 33;

/// Computes the binary key of `name`.
///
/// Each UTF-8 byte is folded in as `hash * 33 + byte` starting from
/// `0xFFFFFFFF`, with wrapping arithmetic. The empty string maps to `0`, the
/// key the game uses for "no name".
///
/// ```
/// use ugpack_types::hash::bin_hash;
///
/// assert_eq!(bin_hash("a"), 0x40);
/// assert_eq!(bin_hash(""), 0);
/// ```
pub fn bin_hash(name: &str) -> u32 {
	if name.is_empty() {
		return 0;
	}

	name.bytes().fold(HASH_SEED, |hash, byte| {
		hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(u32::from(byte))
	})
}

/// Reverse lookup table from binary keys to the names that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDictionary {
	names: HashMap<u32, String>,
}

impl KeyDictionary {
	/// Creates an empty dictionary.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a dictionary from a list of names.
	pub fn from_names<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut dict = Self::new();
		for name in names {
			dict.insert(name.as_ref());
		}
		dict
	}

	/// Loads one name per line, ignoring blank lines and surrounding whitespace.
	pub fn load_lines<R: BufRead>(reader: R) -> std::io::Result<Self> {
		let mut dict = Self::new();
		for line in reader.lines() {
			let line = line?;
			let name = line.trim();
			if !name.is_empty() {
				dict.insert(name);
			}
		}
		Ok(dict)
	}

	/// Registers `name` and returns its key.
	///
	/// On a hash collision the first registered name is kept.
	pub fn insert(&mut self, name: &str) -> u32 {
		let key = bin_hash(name);
		self.names.entry(key).or_insert_with(|| name.to_string());
		key
	}

	/// Returns the name registered for `key`, if any.
	pub fn resolve(&self, key: u32) -> Option<&str> {
		self.names.get(&key).map(String::as_str)
	}

	/// Returns the name registered for `key`, or an empty string when unknown.
	pub fn bin_string(&self, key: u32) -> String {
		self.resolve(key).unwrap_or_default().to_string()
	}

	/// Number of registered names.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	/// Returns `true` when no names are registered.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}
