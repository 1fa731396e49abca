//! User domain type.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lowkal_core::{Email, ProductId, UserId};

use super::epoch;

/// A marketplace account.
///
/// `password_hash` is an Argon2id PHC string; it is serialized under the
/// historical `passwordSecret` key. `liked_product_ids` is the user's
/// favorites set; membership is the only state favorites need, ordering
/// always comes from the products collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique, stable account id.
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    /// Argon2id PHC string.
    #[serde(rename = "passwordSecret", default)]
    pub password_hash: String,
    /// Free-text profile bio.
    #[serde(default)]
    pub bio: String,
    /// Favorited product ids.
    #[serde(default)]
    pub liked_product_ids: BTreeSet<ProductId>,
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The display name denormalized onto products and interactions at
    /// write time. Deliberately a point-in-time snapshot: later profile
    /// edits do not retroactively rename published listings or messages.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
