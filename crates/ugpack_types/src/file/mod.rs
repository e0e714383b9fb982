//! File type support for the `ugpack-rs` project.

mod error;

pub mod charset;
pub mod stream;
pub mod tpk;

// Re-export unified error type
pub use error::{FileType, UgFileError};

// Re-export main file types
pub use charset::{Charset, ENTRY_TABLE_LEN as CHARSET_ENTRY_TABLE_LEN};
pub use tpk::{
	AnimSlot, AnimationPack, FieldDescriptor, FrameEntry, SerializationHeader, synchronize,
};
