//! This crate provides core data types and file format support for the `ugpack-rs` project.
//!
//! # File Formats
//!
//! - **TPK animation pack**: named texture animation slots stored in texture packs,
//!   readable and writable both as the native game block and as a compressed
//!   serialized form
//! - **Charset**: the lead/trail byte code page used by in-game text
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use ugpack_types::prelude::*;
//!
//! let data = std::fs::read("anims.bin").unwrap();
//! let dict = KeyDictionary::from_names(["FIRE_01", "FIRE_02"]);
//! let pack = AnimationPack::from_bytes(&data, &dict).unwrap();
//! println!("{pack}");
//! ```
//!
//! Or use explicit paths:
//!
//! ```
//! use ugpack_types::{file::tpk::AnimSlot, hash::bin_hash};
//!
//! let slot = AnimSlot::new("fire").unwrap();
//! assert_eq!(slot.key(), bin_hash("fire"));
//! ```

pub mod file;
pub mod game;
pub mod hash;

/// `use ugpack_types::prelude::*;` to import commonly used items.
pub mod prelude;
