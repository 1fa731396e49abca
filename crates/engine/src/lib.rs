//! Lowkal Engine - the marketplace state engine.
//!
//! This crate owns the canonical entity model of a peer-to-peer local
//! marketplace (users, products, interactions, session), the pure view
//! engines derived from it (catalog, threads/inbox, favorites), and the
//! persistence adapter boundary.
//!
//! # Architecture
//!
//! - [`models`] - The typed entity model and the `UiConfig` document.
//! - [`store`] - `EntityStore`, the single in-memory snapshot.
//! - [`marketplace`] - `Marketplace`, the public mutation API. Every
//!   operation runs synchronously to completion, is all-or-nothing with
//!   respect to the snapshot, and persists the affected documents on
//!   success.
//! - [`views`] - Pure recomputation over the snapshot; never mutates.
//! - [`auth`] - Argon2id password hashing and the session gate errors.
//! - [`persist`] - `BlobStore` adapter (memory and file backed) plus the
//!   defensive snapshot codec.
//!
//! Persistence failures are deliberately non-fatal: the in-memory
//! snapshot stays authoritative for the session and the failure is
//! surfaced as a `tracing` warning.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod error;
pub mod marketplace;
pub mod models;
pub mod persist;
pub mod session;
pub mod store;
pub mod views;

pub use auth::AuthError;
pub use error::{EngineError, NotFoundError, PermissionError, ValidationError};
pub use marketplace::Marketplace;
pub use models::{Interaction, InteractionDraft, Product, ProductDraft, UiConfig, User};
pub use persist::{BlobStore, FileBlobStore, MemoryBlobStore, PersistenceError};
pub use session::Session;
pub use store::EntityStore;
pub use views::threads::InboxEntry;
