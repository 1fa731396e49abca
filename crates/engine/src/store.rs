//! The single in-memory snapshot.
//!
//! `EntityStore` owns the canonical collections (users, products,
//! interactions), the session pointer, and the ui configuration. It
//! exposes read accessors and the low-level mutations the marketplace
//! operations build on; all validation and gating lives one level up in
//! [`crate::marketplace`].
//!
//! Collection ordering is part of the contract: products are kept
//! newest-first (publish prepends), interactions in insertion order
//! (send appends).

use lowkal_core::{Email, InteractionId, ProductId, UserId};

use crate::models::{Interaction, Product, UiConfig, User};
use crate::session::Session;

/// The full application snapshot at a point in time.
#[derive(Debug)]
pub struct EntityStore {
    users: Vec<User>,
    session: Session,
    products: Vec<Product>,
    interactions: Vec<Interaction>,
    ui: UiConfig,
    next_product_id: i64,
    next_interaction_id: i64,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::from_parts(
            Vec::new(),
            Session::Anonymous,
            Vec::new(),
            Vec::new(),
            UiConfig::default(),
        )
    }
}

impl EntityStore {
    /// Assemble a snapshot from loaded collections.
    ///
    /// Id counters resume above the highest loaded id so fresh entities
    /// stay creation-ordered.
    #[must_use]
    pub fn from_parts(
        users: Vec<User>,
        session: Session,
        products: Vec<Product>,
        interactions: Vec<Interaction>,
        ui: UiConfig,
    ) -> Self {
        let next_product_id = products.iter().map(|p| p.id.as_i64()).max().unwrap_or(0) + 1;
        let next_interaction_id = interactions
            .iter()
            .map(|m| m.id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            users,
            session,
            products,
            interactions,
            ui,
            next_product_id,
            next_interaction_id,
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    #[must_use]
    pub const fn ui(&self) -> &UiConfig {
        &self.ui
    }

    #[must_use]
    pub const fn session(&self) -> Session {
        self.session
    }

    /// The authenticated user's record, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.session.user_id().and_then(|id| self.user_by_id(id))
    }

    #[must_use]
    pub fn user_by_id(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Look a user up by email, case-insensitively.
    #[must_use]
    pub fn user_by_email(&self, email: &Email) -> Option<&User> {
        self.users.iter().find(|u| u.email.eq_ignore_case(email))
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    // =========================================================================
    // Mutation primitives (gated by the marketplace layer)
    // =========================================================================

    pub(crate) fn set_session(&mut self, session: Session) {
        self.session = session;
    }

    pub(crate) fn push_user(&mut self, user: User) {
        self.users.push(user);
    }

    pub(crate) fn user_by_id_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    pub(crate) fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    pub(crate) fn alloc_product_id(&mut self) -> ProductId {
        let id = ProductId::new(self.next_product_id);
        self.next_product_id += 1;
        id
    }

    pub(crate) fn alloc_interaction_id(&mut self) -> InteractionId {
        let id = InteractionId::new(self.next_interaction_id);
        self.next_interaction_id += 1;
        id
    }

    /// Newest listings go to the front, matching the collection's
    /// newest-first ordering contract.
    pub(crate) fn prepend_product(&mut self, product: Product) {
        self.products.insert(0, product);
    }

    pub(crate) fn append_interaction(&mut self, interaction: Interaction) {
        self.interactions.push(interaction);
    }

    /// Remove a product and every interaction referencing it.
    ///
    /// Returns whether the product existed. The cascade keeps the
    /// no-orphan invariant: an interaction never outlives its product.
    pub(crate) fn remove_product_cascade(&mut self, id: ProductId) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() == before {
            return false;
        }
        self.interactions.retain(|m| m.product_id != id);
        true
    }

    pub(crate) fn ui_mut(&mut self) -> &mut UiConfig {
        &mut self.ui
    }

    /// Clear products, interactions, and ui config; users and the
    /// session survive.
    pub(crate) fn reset_catalog(&mut self) {
        self.products.clear();
        self.interactions.clear();
        self.ui = UiConfig::default();
        self.next_product_id = 1;
        self.next_interaction_id = 1;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use lowkal_core::{Condition, InteractionKind, Price};

    use super::*;

    fn product(id: i64, owner: UserId) -> Product {
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
            owner_id: owner,
            owner_display_name: "Test".to_owned(),
            created_at: Utc::now(),
        }
    }

    fn interaction(id: i64, product_id: i64) -> Interaction {
        Interaction {
            id: InteractionId::new(id),
            product_id: ProductId::new(product_id),
            author_display_name: "Test".to_owned(),
            kind: InteractionKind::Message,
            body: "merhaba".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_id_counters_resume_above_loaded_ids() {
        let owner = UserId::generate();
        let mut store = EntityStore::from_parts(
            Vec::new(),
            Session::Anonymous,
            vec![product(7, owner), product(3, owner)],
            vec![interaction(12, 7)],
            UiConfig::default(),
        );
        assert_eq!(store.alloc_product_id(), ProductId::new(8));
        assert_eq!(store.alloc_interaction_id(), InteractionId::new(13));
    }

    #[test]
    fn test_prepend_keeps_newest_first() {
        let owner = UserId::generate();
        let mut store = EntityStore::default();
        store.prepend_product(product(1, owner));
        store.prepend_product(product(2, owner));
        let ids: Vec<i64> = store.products().iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_cascade_removes_interactions() {
        let owner = UserId::generate();
        let mut store = EntityStore::from_parts(
            Vec::new(),
            Session::Anonymous,
            vec![product(1, owner), product(2, owner)],
            vec![interaction(1, 1), interaction(2, 2), interaction(3, 1)],
            UiConfig::default(),
        );
        assert!(store.remove_product_cascade(ProductId::new(1)));
        assert_eq!(store.products().len(), 1);
        assert_eq!(store.interactions().len(), 1);
        assert_eq!(store.interactions()[0].product_id, ProductId::new(2));

        // unknown id: no-op
        assert!(!store.remove_product_cascade(ProductId::new(99)));
    }

    #[test]
    fn test_reset_catalog_preserves_users_and_session() {
        let owner = UserId::generate();
        let mut store = EntityStore::from_parts(
            Vec::new(),
            Session::Authenticated(owner),
            vec![product(1, owner)],
            vec![interaction(1, 1)],
            UiConfig {
                takas_only: true,
                ..UiConfig::default()
            },
        );
        store.reset_catalog();
        assert!(store.products().is_empty());
        assert!(store.interactions().is_empty());
        assert_eq!(*store.ui(), UiConfig::default());
        assert_eq!(store.session(), Session::Authenticated(owner));
    }
}
