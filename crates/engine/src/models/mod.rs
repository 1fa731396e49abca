//! The typed entity model.
//!
//! Persisted snapshots use camelCase keys, so every record derives serde
//! with `rename_all = "camelCase"`. Defaults are chosen so records written
//! by older clients (missing `bio`, missing `likedProductIds`, missing
//! timestamps) decode into a normalized form instead of failing.

pub mod interaction;
pub mod product;
pub mod ui_config;
pub mod user;

pub use interaction::{Interaction, InteractionDraft};
pub use product::{Product, ProductDraft};
pub use ui_config::UiConfig;
pub use user::User;

use chrono::{DateTime, Utc};

/// Default timestamp for records that predate timestamping.
///
/// A missing `createdAt` sorts as the oldest possible entry.
pub(crate) const fn epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}
