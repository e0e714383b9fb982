//! This module is separated into its own crate to enable simple dynamic linking for `ugpack`, and should not be used directly.

/// `use ugpack::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export ugpack_types for convenience
pub use ugpack_types;

// Re-export commonly used types at crate root
pub use ugpack_types::{
	file::{AnimSlot, AnimationPack, Charset, FrameEntry, UgFileError},
	game::Game,
	hash::{KeyDictionary, bin_hash},
};
