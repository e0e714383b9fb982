//! Forces dynamic linking of `ugpack_internal` when the `dynamic_linking` feature is enabled.

#[allow(unused_imports)]
pub use ugpack_internal::*;
