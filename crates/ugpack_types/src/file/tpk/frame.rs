//! Frame entries referenced by animation slots.

use serde::Serialize;

use crate::hash::{KeyDictionary, bin_hash};

/// A single texture reference inside an animation slot.
///
/// Only the key is stored on disk. Entries decoded from a stream resolve their
/// name through a [`KeyDictionary`] and keep the stored key even when the name
/// is unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FrameEntry {
	name: String,
	key: u32,
}

impl FrameEntry {
	/// Creates an entry for the texture `name`.
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		let key = bin_hash(&name);
		Self {
			name,
			key,
		}
	}

	/// Creates an entry from a stored key, resolving its name through `dict`.
	pub fn from_key(key: u32, dict: &KeyDictionary) -> Self {
		Self {
			name: dict.bin_string(key),
			key,
		}
	}

	/// Texture name, empty when the key could not be resolved.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Binary key of the texture.
	pub fn key(&self) -> u32 {
		self.key
	}

	/// Renames the entry and recomputes its key.
	pub fn set_name(&mut self, name: impl Into<String>) {
		*self = Self::new(name);
	}
}

impl std::fmt::Display for FrameEntry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.name.is_empty() {
			write!(f, "0x{:08X}", self.key)
		} else {
			write!(f, "{}", self.name)
		}
	}
}
