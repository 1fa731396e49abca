//! Pure derived views.
//!
//! Every function here reads a consistent snapshot and returns a fresh
//! ordering; nothing mutates. Views are recomputed eagerly on demand -
//! there is no cache to invalidate.

pub mod catalog;
pub mod favorites;
pub mod threads;
