//! Prelude module for `ugpack_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use ugpack_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let mut pack = AnimationPack::new("GLOBAL_ANIMS");
//! let mut slot = AnimSlot::new("fire").unwrap();
//! slot.add_frame("FIRE_01");
//! pack.add_slot(slot);
//!
//! let charset = Charset::new();
//! assert_eq!(charset.decode(b"abc"), "abc");
//! ```

// Re-export everything from ugpack_types::prelude
#[doc(inline)]
pub use ugpack_types::prelude::*;

// Re-export the entire ugpack_types module for advanced usage
#[doc(inline)]
pub use ugpack_types;
