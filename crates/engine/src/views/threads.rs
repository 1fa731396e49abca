//! Per-product threads and the conversations inbox.

use lowkal_core::ProductId;

use crate::models::{Interaction, Product};

/// One inbox row: a listing and the freshest interaction on it.
#[derive(Debug, Clone, Copy)]
pub struct InboxEntry<'a> {
    pub product: &'a Product,
    pub last_interaction: &'a Interaction,
}

/// All interactions on one listing, in insertion (creation) order.
#[must_use]
pub fn thread_for(interactions: &[Interaction], product_id: ProductId) -> Vec<&Interaction> {
    interactions
        .iter()
        .filter(|m| m.product_id == product_id)
        .collect()
}

/// The conversations inbox: the freshest interaction per listing,
/// newest conversation first.
///
/// Groups in first-interaction order, keeping per group the interaction
/// with the greatest `created_at`; on a timestamp tie the later-inserted
/// interaction wins. Groups whose product no longer exists are dropped.
/// The final ordering is a stable descending sort on the winning
/// timestamp.
#[must_use]
pub fn inbox<'a>(interactions: &'a [Interaction], products: &'a [Product]) -> Vec<InboxEntry<'a>> {
    let mut freshest: Vec<(ProductId, &Interaction)> = Vec::new();

    for interaction in interactions {
        match freshest
            .iter_mut()
            .find(|(id, _)| *id == interaction.product_id)
        {
            // keep the incumbent only while strictly newer: equal
            // timestamps hand the slot to the later arrival
            Some((_, current)) if current.created_at > interaction.created_at => {}
            Some((_, current)) => *current = interaction,
            None => freshest.push((interaction.product_id, interaction)),
        }
    }

    let mut entries: Vec<InboxEntry<'a>> = freshest
        .into_iter()
        .filter_map(|(product_id, last_interaction)| {
            products
                .iter()
                .find(|p| p.id == product_id)
                .map(|product| InboxEntry {
                    product,
                    last_interaction,
                })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.last_interaction
            .created_at
            .cmp(&a.last_interaction.created_at)
    });
    entries
}
