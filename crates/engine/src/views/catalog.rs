//! Filtered, sorted catalog derivation.

use lowkal_core::{SortMode, UserId};

use crate::models::{Product, UiConfig};

/// Compute the catalog: filter by the active configuration, then apply a
/// stable sort for the selected mode.
///
/// The filter keeps a product when all of these hold:
/// - it is within `max_distance_km`,
/// - barter filtering is off or the product accepts barter,
/// - the search text (trimmed, case-folded) is empty or occurs in the
///   folded concatenation of title, category, and description.
///
/// Sorting is stable, so equal keys keep the collection's newest-first
/// order. The input is never reordered.
#[must_use]
pub fn compute<'a>(products: &'a [Product], config: &UiConfig) -> Vec<&'a Product> {
    let needle = config.search_text.trim().to_lowercase();

    let mut result: Vec<&Product> = products
        .iter()
        .filter(|p| {
            if p.distance_km > f64::from(config.max_distance_km) {
                return false;
            }
            if config.takas_only && !p.takas_enabled {
                return false;
            }
            if !needle.is_empty() {
                let haystack =
                    format!("{}{}{}", p.title, p.category, p.description).to_lowercase();
                if !haystack.contains(&needle) {
                    return false;
                }
            }
            true
        })
        .collect();

    match config.sort_mode {
        SortMode::Newest => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::PriceLow => result.sort_by(|a, b| a.price.cmp(&b.price)),
        SortMode::PriceHigh => result.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    result
}

/// The listings owned by one user, in collection order.
///
/// Feeds the "my listings" view and the exchange-offer picker.
#[must_use]
pub fn owned_by(products: &[Product], owner: UserId) -> Vec<&Product> {
    products.iter().filter(|p| p.owner_id == owner).collect()
}
