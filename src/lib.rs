#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `ugpack-rs` reads and writes the texture animation packs and text charsets
//! of Need for Speed: Underground.
//!
pub use ugpack_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use ugpack_dylib;
