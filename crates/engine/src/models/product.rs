//! Product (listing) domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lowkal_core::{Condition, Price, ProductId, UserId};

use super::epoch;

/// A published listing.
///
/// `owner_display_name` is denormalized from the owner's profile at
/// publish time and never re-derived; renaming yourself does not rewrite
/// your old listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique id, allocated monotonically so it sorts by creation.
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub price: Price,
    pub category: String,
    #[serde(default)]
    pub condition: Condition,
    /// Opaque photo reference (data URL in practice).
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub description: String,
    /// Whether the seller accepts barter (takas) offers.
    #[serde(default)]
    pub takas_enabled: bool,
    /// Distance from the viewer, in kilometers.
    #[serde(default)]
    pub distance_km: f64,
    pub owner_id: UserId,
    /// Snapshot of the owner's name at publish time.
    #[serde(default)]
    pub owner_display_name: String,
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
}

/// Fields the publish and edit forms submit.
///
/// The photo, title, price, and category are required for the draft to be
/// publishable; the surrounding UI pre-validates, so an incomplete draft
/// makes the publish/update call a silent no-op rather than an error.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub photo: String,
    pub title: String,
    pub price: Price,
    pub category: String,
    pub condition: Condition,
    pub description: String,
    pub takas_enabled: bool,
    pub distance_km: f64,
}

impl ProductDraft {
    /// Whether all required fields are present and the price is positive.
    #[must_use]
    pub fn is_publishable(&self) -> bool {
        !self.photo.trim().is_empty()
            && !self.title.trim().is_empty()
            && self.price.is_positive()
            && !self.category.trim().is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn complete_draft() -> ProductDraft {
        ProductDraft {
            photo: "data:image/jpeg;base64,...".to_owned(),
            title: "Dağ bisikleti".to_owned(),
            price: Price::new(Decimal::new(1500, 0)).unwrap(),
            category: "Spor".to_owned(),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn test_complete_draft_is_publishable() {
        assert!(complete_draft().is_publishable());
    }

    #[test]
    fn test_blank_required_field_blocks_publish() {
        let mut draft = complete_draft();
        draft.title = "   ".to_owned();
        assert!(!draft.is_publishable());

        let mut draft = complete_draft();
        draft.photo.clear();
        assert!(!draft.is_publishable());

        let mut draft = complete_draft();
        draft.category.clear();
        assert!(!draft.is_publishable());
    }

    #[test]
    fn test_zero_price_blocks_publish() {
        let mut draft = complete_draft();
        draft.price = Price::ZERO;
        assert!(!draft.is_publishable());
    }

    #[test]
    fn test_legacy_product_decodes_with_defaults() {
        let json = format!(
            r#"{{"id":7,"title":"Kitap","category":"Kitap","price":"45","ownerId":"{}"}}"#,
            UserId::generate()
        );
        let product: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.price.to_string(), "45");
        assert_eq!(product.condition, Condition::Good);
        assert!(!product.takas_enabled);
        assert_eq!(product.created_at, DateTime::UNIX_EPOCH);
    }
}
