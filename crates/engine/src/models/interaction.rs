//! Interaction (message / offer / exchange) domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lowkal_core::{InteractionId, InteractionKind, Price, ProductId};

use super::epoch;

/// One entry in a listing's negotiation thread.
///
/// Interactions are append-only: created by the send action, never
/// edited, and removed only by product-delete cascade or a full reset.
/// The `body` is the rendered text built by the protocol-level
/// construction rules in [`crate::marketplace`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    /// Unique id, allocated monotonically so it sorts by creation.
    pub id: InteractionId,
    pub product_id: ProductId,
    /// Snapshot of the sender's name at send time.
    #[serde(default)]
    pub author_display_name: String,
    pub kind: InteractionKind,
    /// Rendered body text.
    #[serde(rename = "body", alias = "text")]
    pub body: String,
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
}

/// What the send form submits before the body is composed.
#[derive(Debug, Clone)]
pub struct InteractionDraft {
    /// The listing being negotiated.
    pub product_id: ProductId,
    pub kind: InteractionKind,
    /// Free text; optional for offers and exchanges.
    pub text: String,
    /// Cash amount: the offer itself, or the delta on top of an exchange.
    pub offer_price: Option<Price>,
    /// For exchanges: one of the sender's own listings.
    pub exchange_product_id: Option<ProductId>,
}

impl InteractionDraft {
    /// A plain message draft.
    #[must_use]
    pub fn message(product_id: ProductId, text: impl Into<String>) -> Self {
        Self {
            product_id,
            kind: InteractionKind::Message,
            text: text.into(),
            offer_price: None,
            exchange_product_id: None,
        }
    }

    /// A cash offer draft.
    #[must_use]
    pub fn offer(product_id: ProductId, price: Price, note: impl Into<String>) -> Self {
        Self {
            product_id,
            kind: InteractionKind::Offer,
            text: note.into(),
            offer_price: Some(price),
            exchange_product_id: None,
        }
    }

    /// A barter offer draft referencing one of the sender's own listings.
    #[must_use]
    pub fn exchange(
        product_id: ProductId,
        offered_product: ProductId,
        cash_delta: Option<Price>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            product_id,
            kind: InteractionKind::Exchange,
            text: note.into(),
            offer_price: cash_delta,
            exchange_product_id: Some(offered_product),
        }
    }
}
