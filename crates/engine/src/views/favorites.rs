//! Favorites derivation.
//!
//! The liked set lives on the user record; ordering always comes from
//! the products collection, so favorites follow catalog order rather
//! than like order.

use lowkal_core::ProductId;

use crate::models::{Product, User};

/// Whether the user has favorited the product.
#[must_use]
pub fn is_favorite(user: &User, product_id: ProductId) -> bool {
    user.liked_product_ids.contains(&product_id)
}

/// The user's favorited products, in the products collection's current
/// order. Liked ids whose product was deleted are silently absent.
#[must_use]
pub fn favorites_of<'a>(user: &User, products: &'a [Product]) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| user.liked_product_ids.contains(&p.id))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::Utc;
    use lowkal_core::{Condition, Email, Price, UserId};

    use super::*;

    fn user_liking(ids: &[i64]) -> User {
        User {
            id: UserId::generate(),
            first_name: "Ayşe".to_owned(),
            last_name: "Demir".to_owned(),
            email: Email::parse("ayse@example.com").unwrap(),
            password_hash: String::new(),
            bio: String::new(),
            liked_product_ids: ids.iter().map(|&i| ProductId::new(i)).collect::<BTreeSet<_>>(),
            created_at: Utc::now(),
        }
    }

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Ürün {id}"),
            price: Price::ZERO,
            category: "Diğer".to_owned(),
            condition: Condition::Good,
            photo: String::new(),
            description: String::new(),
            takas_enabled: false,
            distance_km: 1.0,
            owner_id: UserId::generate(),
            owner_display_name: "Satıcı".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_favorite() {
        let user = user_liking(&[3]);
        assert!(is_favorite(&user, ProductId::new(3)));
        assert!(!is_favorite(&user, ProductId::new(4)));
    }

    #[test]
    fn test_favorites_follow_collection_order() {
        let user = user_liking(&[2, 5]);
        let products = vec![product(5), product(1), product(2)];
        let ids: Vec<i64> = favorites_of(&user, &products)
            .iter()
            .map(|p| p.id.as_i64())
            .collect();
        // collection order, not numeric like order
        assert_eq!(ids, vec![5, 2]);
    }

    #[test]
    fn test_deleted_favorites_are_absent() {
        let user = user_liking(&[9]);
        assert!(favorites_of(&user, &[product(1)]).is_empty());
    }
}
