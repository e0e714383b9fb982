//! Prelude module for `ugpack_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```
//! use ugpack_types::prelude::*;
//!
//! let mut pack = AnimationPack::new("ANIMS");
//! pack.add_slot(AnimSlot::new("fire").unwrap());
//! assert_eq!(pack.game(), Game::Underground1);
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Animation pack types
	AnimSlot,
	AnimationPack,

	// Charset types
	CHARSET_ENTRY_TABLE_LEN,
	Charset,

	FieldDescriptor,
	FileType,
	FrameEntry,
	SerializationHeader,
	UgFileError,

	synchronize,
};

// Game layouts
#[doc(inline)]
pub use crate::game::{BlockIds, Game, Layout};

// Key hashing
#[doc(inline)]
pub use crate::hash::{KeyDictionary, bin_hash};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
