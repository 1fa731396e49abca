//! Lowkal Core - Shared types library.
//!
//! This crate provides common types used across all Lowkal components:
//! - `engine` - The marketplace state engine
//! - `cli` - Command-line client over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   the fixed enums used across the wire format

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
