//! The public mutation API.
//!
//! `Marketplace` wires the in-memory [`EntityStore`] to a [`BlobStore`]
//! and exposes every operation the client performs. Operations are
//! synchronous and all-or-nothing: validation and gating happen before
//! any state is touched, so a failed call leaves the snapshot exactly as
//! it was. Successful mutations persist the affected documents; a
//! persistence failure is logged and the in-memory state stays
//! authoritative for the session.

use chrono::Utc;

use lowkal_core::{Email, InteractionId, InteractionKind, Price, ProductId, UserId};

use crate::auth::{self, AuthError, MIN_PASSWORD_LENGTH};
use crate::error::{EngineError, NotFoundError, PermissionError, ValidationError};
use crate::models::{Interaction, InteractionDraft, Product, ProductDraft, UiConfig, User};
use crate::persist::{BlobStore, snapshot};
use crate::session::Session;
use crate::store::EntityStore;
use crate::views::{catalog, favorites, threads};

/// The marketplace engine: one snapshot, one storage backend.
#[derive(Debug)]
pub struct Marketplace<S: BlobStore> {
    state: EntityStore,
    store: S,
}

impl<S: BlobStore> Marketplace<S> {
    /// Open the marketplace, loading whatever snapshot the store holds.
    ///
    /// Corrupt or missing documents fall back to defaults; opening never
    /// fails because of bad persisted state.
    pub fn open(mut store: S) -> Self {
        let state = snapshot::load(&mut store);
        Self { state, store }
    }

    /// Read access to the current snapshot.
    #[must_use]
    pub const fn state(&self) -> &EntityStore {
        &self.state
    }

    /// Read access to the storage backend.
    #[must_use]
    pub const fn blob_store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// The filtered, sorted catalog for the active configuration.
    #[must_use]
    pub fn catalog(&self) -> Vec<&Product> {
        catalog::compute(self.state.products(), self.state.ui())
    }

    /// The current user's own listings; empty when anonymous.
    #[must_use]
    pub fn my_listings(&self) -> Vec<&Product> {
        self.state
            .session()
            .user_id()
            .map(|id| catalog::owned_by(self.state.products(), id))
            .unwrap_or_default()
    }

    /// The negotiation thread on one listing, in creation order.
    #[must_use]
    pub fn thread(&self, product_id: ProductId) -> Vec<&Interaction> {
        threads::thread_for(self.state.interactions(), product_id)
    }

    /// The conversations inbox, newest first.
    #[must_use]
    pub fn inbox(&self) -> Vec<threads::InboxEntry<'_>> {
        threads::inbox(self.state.interactions(), self.state.products())
    }

    /// The current user's favorites in catalog order; empty when
    /// anonymous.
    #[must_use]
    pub fn favorites(&self) -> Vec<&Product> {
        self.state
            .current_user()
            .map(|user| favorites::favorites_of(user, self.state.products()))
            .unwrap_or_default()
    }

    /// Whether the current user has favorited the product.
    #[must_use]
    pub fn is_favorite(&self, product_id: ProductId) -> bool {
        self.state
            .current_user()
            .is_some_and(|user| favorites::is_favorite(user, product_id))
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Register a new account and authenticate as it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a required field is blank, the
    /// password is shorter than six characters or does not match its
    /// confirmation, or the email is already registered (any letter
    /// case). Returns [`AuthError::PasswordHash`] if hashing fails.
    pub fn sign_up(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<UserId, EngineError> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        if first_name.is_empty() {
            return Err(ValidationError::MissingField("first name").into());
        }
        if last_name.is_empty() {
            return Err(ValidationError::MissingField("last name").into());
        }
        if password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }

        let email = Email::parse(email).map_err(ValidationError::Email)?;

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            }
            .into());
        }
        if password != confirm_password {
            return Err(ValidationError::PasswordMismatch.into());
        }
        if self.state.user_by_email(&email).is_some() {
            return Err(ValidationError::EmailTaken.into());
        }

        let password_hash = auth::hash_password(password)?;
        let user = User {
            id: UserId::generate(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email,
            password_hash,
            bio: String::new(),
            liked_product_ids: std::collections::BTreeSet::new(),
            created_at: Utc::now(),
        };
        let id = user.id;

        self.state.push_user(user);
        self.state.set_session(Session::Authenticated(id));
        self.persist_users();
        self.persist_session();

        tracing::info!(user = %id, "account created");
        Ok(id)
    }

    /// Authenticate an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] unless a user matches
    /// the email (case-insensitive) and the password verifies against
    /// the stored hash. A failed attempt does not change the session.
    pub fn log_in(&mut self, email: &str, password: &str) -> Result<UserId, EngineError> {
        let Ok(email) = Email::parse(email) else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let (id, hash) = self
            .state
            .user_by_email(&email)
            .map(|u| (u.id, u.password_hash.clone()))
            .ok_or(AuthError::InvalidCredentials)?;

        auth::verify_password(password, &hash)?;

        self.state.set_session(Session::Authenticated(id));
        self.persist_session();

        tracing::info!(user = %id, "logged in");
        Ok(id)
    }

    /// Clear the session. Deletes nothing; always succeeds.
    pub fn log_out(&mut self) {
        self.state.set_session(Session::Anonymous);
        self.persist_session();
    }

    /// Update the current user's bio.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotLoggedIn`] when anonymous.
    pub fn save_profile(&mut self, bio: &str) -> Result<(), EngineError> {
        let id = self.require_session()?;
        if let Some(user) = self.state.user_by_id_mut(id) {
            user.bio = bio.to_owned();
        }
        self.persist_users();
        self.persist_session();
        Ok(())
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// Publish a new listing.
    ///
    /// Returns `Ok(None)` without changing anything when the draft is
    /// missing a required field (the UI pre-validates, so an incomplete
    /// draft is a silent no-op, not an error).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotLoggedIn`] when anonymous.
    pub fn publish_product(
        &mut self,
        draft: &ProductDraft,
    ) -> Result<Option<ProductId>, EngineError> {
        let owner_id = self.require_session()?;
        let owner_display_name = self
            .state
            .user_by_id(owner_id)
            .map(User::display_name)
            .unwrap_or_default();

        if !draft.is_publishable() {
            return Ok(None);
        }

        let id = self.state.alloc_product_id();
        self.state.prepend_product(Product {
            id,
            title: draft.title.trim().to_owned(),
            price: draft.price,
            category: draft.category.trim().to_owned(),
            condition: draft.condition,
            photo: draft.photo.clone(),
            description: draft.description.clone(),
            takas_enabled: draft.takas_enabled,
            distance_km: sanitize_distance(draft.distance_km),
            owner_id,
            owner_display_name,
            created_at: Utc::now(),
        });
        self.persist_products();

        tracing::info!(product = %id, "listing published");
        Ok(Some(id))
    }

    /// Edit an existing listing.
    ///
    /// Returns `Ok(false)` without changing anything when the draft is
    /// incomplete. Id, owner, the owner's name snapshot, distance, and
    /// the creation timestamp are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotLoggedIn`] when anonymous,
    /// [`NotFoundError::Product`] for an unknown id, and
    /// [`PermissionError::NotOwner`] when the caller does not own the
    /// listing.
    pub fn update_product(
        &mut self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<bool, EngineError> {
        let caller = self.require_session()?;
        let owner_id = self
            .state
            .product(id)
            .map(|p| p.owner_id)
            .ok_or(NotFoundError::Product(id))?;
        if owner_id != caller {
            return Err(PermissionError::NotOwner { product: id }.into());
        }
        if !draft.is_publishable() {
            return Ok(false);
        }

        if let Some(product) = self.state.product_mut(id) {
            product.title = draft.title.trim().to_owned();
            product.price = draft.price;
            product.category = draft.category.trim().to_owned();
            product.condition = draft.condition;
            product.photo = draft.photo.clone();
            product.description = draft.description.clone();
            product.takas_enabled = draft.takas_enabled;
        }
        self.persist_products();
        Ok(true)
    }

    /// Delete a listing and every interaction on it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotLoggedIn`] when anonymous,
    /// [`NotFoundError::Product`] for an unknown id, and
    /// [`PermissionError::NotOwner`] when the caller does not own the
    /// listing.
    pub fn delete_product(&mut self, id: ProductId) -> Result<(), EngineError> {
        let caller = self.require_session()?;
        let owner_id = self
            .state
            .product(id)
            .map(|p| p.owner_id)
            .ok_or(NotFoundError::Product(id))?;
        if owner_id != caller {
            return Err(PermissionError::NotOwner { product: id }.into());
        }

        self.state.remove_product_cascade(id);
        self.persist_products();
        self.persist_interactions();

        tracing::info!(product = %id, "listing deleted");
        Ok(())
    }

    /// Flip the current user's favorite on a listing.
    ///
    /// Returns the new membership. Toggling twice restores the original
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotLoggedIn`] when anonymous.
    pub fn toggle_favorite(&mut self, product_id: ProductId) -> Result<bool, EngineError> {
        let id = self.require_session()?;
        let mut now_favorite = false;
        if let Some(user) = self.state.user_by_id_mut(id) {
            if !user.liked_product_ids.remove(&product_id) {
                user.liked_product_ids.insert(product_id);
                now_favorite = true;
            }
        }
        self.persist_users();
        self.persist_session();
        Ok(now_favorite)
    }

    // =========================================================================
    // Interactions
    // =========================================================================

    /// Send a message, offer, or exchange proposal on a listing.
    ///
    /// Returns `Ok(None)` without changing anything when the composed
    /// body ends up empty: a blank message, an offer without a positive
    /// amount, or an exchange whose referenced listing is not one of the
    /// sender's own.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotLoggedIn`] when anonymous and
    /// [`NotFoundError::Product`] when the target listing is gone.
    pub fn send_interaction(
        &mut self,
        draft: &InteractionDraft,
    ) -> Result<Option<InteractionId>, EngineError> {
        let sender = self.require_session()?;
        let author_display_name = self
            .state
            .user_by_id(sender)
            .map(User::display_name)
            .unwrap_or_default();

        if self.state.product(draft.product_id).is_none() {
            return Err(NotFoundError::Product(draft.product_id).into());
        }

        let Some(body) = compose_body(&self.state, sender, draft) else {
            return Ok(None);
        };

        let id = self.state.alloc_interaction_id();
        self.state.append_interaction(Interaction {
            id,
            product_id: draft.product_id,
            author_display_name,
            kind: draft.kind,
            body,
            created_at: Utc::now(),
        });
        self.persist_interactions();

        Ok(Some(id))
    }

    // =========================================================================
    // Configuration and reset
    // =========================================================================

    /// Mutate the filter / sort / search configuration and persist it.
    /// The radius is clamped into its valid range afterwards.
    pub fn update_config(&mut self, apply: impl FnOnce(&mut UiConfig)) {
        let ui = self.state.ui_mut();
        apply(ui);
        ui.max_distance_km = UiConfig::clamp_radius(ui.max_distance_km);
        self.persist_ui();
    }

    /// Clear products, interactions, and the ui configuration; accounts
    /// and the session survive. Asking the user for confirmation is the
    /// caller's job.
    pub fn reset_all(&mut self) {
        self.state.reset_catalog();
        if let Err(err) = snapshot::clear_catalog(&mut self.store) {
            tracing::warn!(error = %err, "failed to clear persisted catalog");
        }
        tracing::info!("catalog reset");
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn require_session(&self) -> Result<UserId, EngineError> {
        self.state
            .session()
            .user_id()
            .ok_or_else(|| AuthError::NotLoggedIn.into())
    }

    fn persist_users(&mut self) {
        if let Err(err) = snapshot::save_users(&mut self.store, self.state.users()) {
            warn_persist("users", &err);
        }
    }

    fn persist_session(&mut self) {
        if let Err(err) = snapshot::save_current_user(&mut self.store, self.state.current_user()) {
            warn_persist("current user", &err);
        }
    }

    fn persist_products(&mut self) {
        if let Err(err) = snapshot::save_products(&mut self.store, self.state.products()) {
            warn_persist("products", &err);
        }
    }

    fn persist_interactions(&mut self) {
        if let Err(err) = snapshot::save_interactions(&mut self.store, self.state.interactions()) {
            warn_persist("interactions", &err);
        }
    }

    fn persist_ui(&mut self) {
        if let Err(err) = snapshot::save_ui(&mut self.store, self.state.ui()) {
            warn_persist("ui config", &err);
        }
    }
}

fn warn_persist(what: &str, err: &crate::persist::PersistenceError) {
    // in-memory state stays authoritative; the write is retried on the
    // next successful mutation of the same document
    tracing::warn!(document = what, error = %err, "persistence write failed");
}

fn sanitize_distance(km: f64) -> f64 {
    if km.is_finite() && km >= 0.0 { km } else { 0.0 }
}

/// Build the rendered interaction body.
///
/// These strings are protocol-level: older clients parse and display
/// them verbatim, so the exact spellings (including the em dash
/// separators) must not change.
fn compose_body(state: &EntityStore, sender: UserId, draft: &InteractionDraft) -> Option<String> {
    let note = draft.text.trim();

    match draft.kind {
        InteractionKind::Message => (!note.is_empty()).then(|| note.to_owned()),
        InteractionKind::Offer => {
            let price = draft.offer_price.filter(Price::is_positive)?;
            let mut body = format!("Teklif: {price} TL");
            if !note.is_empty() {
                body.push_str(&format!(" — {note}"));
            }
            Some(body)
        }
        InteractionKind::Exchange => {
            let target = draft.exchange_product_id?;
            let offered = state.product(target).filter(|p| p.owner_id == sender)?;
            let mut body = format!("Takas Teklifi: \"{}\"", offered.title);
            if let Some(delta) = draft.offer_price.filter(Price::is_positive) {
                body.push_str(&format!(" + {delta} TL"));
            }
            if !note.is_empty() {
                body.push_str(&format!(" — Not: {note}"));
            }
            Some(body)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use lowkal_core::Condition;

    use crate::persist::{MemoryBlobStore, keys};

    use super::*;

    fn engine() -> Marketplace<MemoryBlobStore> {
        Marketplace::open(MemoryBlobStore::new())
    }

    fn signed_up(engine: &mut Marketplace<MemoryBlobStore>, email: &str) -> UserId {
        engine
            .sign_up("Ayşe", "Demir", email, "sifre123", "sifre123")
            .unwrap()
    }

    fn draft(title: &str, price: i64) -> ProductDraft {
        ProductDraft {
            photo: "data:image/jpeg;base64,xx".to_owned(),
            title: title.to_owned(),
            price: Price::new(Decimal::new(price, 0)).unwrap(),
            category: "Elektronik".to_owned(),
            condition: Condition::Good,
            description: String::new(),
            takas_enabled: false,
            distance_km: 1.2,
        }
    }

    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------

    #[test]
    fn test_sign_up_authenticates_and_persists() {
        let mut engine = engine();
        let id = signed_up(&mut engine, "ayse@example.com");

        assert_eq!(engine.state().session(), Session::Authenticated(id));
        assert_eq!(engine.state().users().len(), 1);
        assert!(engine.blob_store().document(keys::USERS).is_some());
        assert!(engine.blob_store().document(keys::CURRENT_USER).is_some());
    }

    #[test]
    fn test_sign_up_rejects_duplicate_email_any_case() {
        let mut engine = engine();
        signed_up(&mut engine, "a@x.com");

        let err = engine
            .sign_up("Başka", "Biri", "A@X.com", "sifre123", "sifre123")
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation(ValidationError::EmailTaken)
        ));
        assert_eq!(engine.state().users().len(), 1);
    }

    #[test]
    fn test_sign_up_validation() {
        let mut engine = engine();
        assert!(matches!(
            engine.sign_up("", "Demir", "a@x.com", "sifre123", "sifre123"),
            Err(EngineError::Validation(ValidationError::MissingField(_)))
        ));
        assert!(matches!(
            engine.sign_up("Ayşe", "Demir", "a@x.com", "12345", "12345"),
            Err(EngineError::Validation(
                ValidationError::PasswordTooShort { .. }
            ))
        ));
        assert!(matches!(
            engine.sign_up("Ayşe", "Demir", "a@x.com", "sifre123", "sifre124"),
            Err(EngineError::Validation(ValidationError::PasswordMismatch))
        ));
        assert!(matches!(
            engine.sign_up("Ayşe", "Demir", "not-an-email", "sifre123", "sifre123"),
            Err(EngineError::Validation(ValidationError::Email(_)))
        ));
        assert!(engine.state().users().is_empty());
        assert_eq!(engine.state().session(), Session::Anonymous);
    }

    #[test]
    fn test_log_in_and_out() {
        let mut engine = engine();
        let id = signed_up(&mut engine, "ayse@example.com");
        engine.log_out();
        assert_eq!(engine.state().session(), Session::Anonymous);

        // wrong password
        assert!(matches!(
            engine.log_in("ayse@example.com", "yanlis"),
            Err(EngineError::Auth(AuthError::InvalidCredentials))
        ));
        assert_eq!(engine.state().session(), Session::Anonymous);

        // case-insensitive email, correct password
        let back = engine.log_in("AYSE@example.COM", "sifre123").unwrap();
        assert_eq!(back, id);
        assert_eq!(engine.state().session(), Session::Authenticated(id));
    }

    #[test]
    fn test_save_profile_requires_session() {
        let mut engine = engine();
        assert!(matches!(
            engine.save_profile("selam"),
            Err(EngineError::Auth(AuthError::NotLoggedIn))
        ));

        signed_up(&mut engine, "a@x.com");
        engine.save_profile("İkinci el eşya satıyorum").unwrap();
        assert_eq!(
            engine.state().current_user().unwrap().bio,
            "İkinci el eşya satıyorum"
        );
    }

    // -------------------------------------------------------------------------
    // Listings
    // -------------------------------------------------------------------------

    #[test]
    fn test_anonymous_publish_is_rejected() {
        let mut engine = engine();
        let err = engine.publish_product(&draft("Kamera", 900)).unwrap_err();
        assert!(matches!(err, EngineError::Auth(AuthError::NotLoggedIn)));
        assert!(engine.state().products().is_empty());
    }

    #[test]
    fn test_incomplete_draft_is_silent_noop() {
        let mut engine = engine();
        signed_up(&mut engine, "a@x.com");

        let mut incomplete = draft("Kamera", 900);
        incomplete.photo.clear();
        assert_eq!(engine.publish_product(&incomplete).unwrap(), None);

        let mut free = draft("Kamera", 900);
        free.price = Price::ZERO;
        assert_eq!(engine.publish_product(&free).unwrap(), None);

        assert!(engine.state().products().is_empty());
    }

    #[test]
    fn test_publish_snapshots_owner_name() {
        let mut engine = engine();
        signed_up(&mut engine, "a@x.com");

        let id = engine.publish_product(&draft("Kamera", 900)).unwrap().unwrap();
        engine.save_profile("yeni bio").unwrap();

        let product = engine.state().product(id).unwrap();
        assert_eq!(product.owner_display_name, "Ayşe Demir");
        assert_eq!(product.title, "Kamera");
    }

    #[test]
    fn test_update_product_owner_only() {
        let mut engine = engine();
        signed_up(&mut engine, "owner@x.com");
        let id = engine.publish_product(&draft("Kamera", 900)).unwrap().unwrap();
        engine.log_out();

        signed_up(&mut engine, "other@x.com");
        assert!(matches!(
            engine.update_product(id, &draft("Çalıntı", 1)),
            Err(EngineError::Permission(PermissionError::NotOwner { .. }))
        ));

        engine.log_in("owner@x.com", "sifre123").unwrap();
        assert!(engine.update_product(id, &draft("Kamera Pro", 950)).unwrap());
        let product = engine.state().product(id).unwrap();
        assert_eq!(product.title, "Kamera Pro");
        assert_eq!(product.id, id);
    }

    #[test]
    fn test_update_unknown_product_is_not_found() {
        let mut engine = engine();
        signed_up(&mut engine, "a@x.com");
        assert!(matches!(
            engine.update_product(ProductId::new(404), &draft("X", 1)),
            Err(EngineError::NotFound(NotFoundError::Product(_)))
        ));
    }

    #[test]
    fn test_delete_cascades_interactions() {
        let mut engine = engine();
        signed_up(&mut engine, "seller@x.com");
        let id = engine.publish_product(&draft("Kamera", 900)).unwrap().unwrap();
        engine
            .send_interaction(&InteractionDraft::message(id, "hâlâ satılık mı?"))
            .unwrap();
        assert_eq!(engine.state().interactions().len(), 1);

        engine.delete_product(id).unwrap();
        assert!(engine.state().products().is_empty());
        assert!(engine.state().interactions().is_empty());
        assert!(engine.inbox().is_empty());
    }

    #[test]
    fn test_toggle_favorite_is_idempotent_pair() {
        let mut engine = engine();
        signed_up(&mut engine, "a@x.com");
        let id = engine.publish_product(&draft("Kamera", 900)).unwrap().unwrap();

        assert!(engine.toggle_favorite(id).unwrap());
        assert!(engine.is_favorite(id));
        assert_eq!(engine.favorites().len(), 1);

        assert!(!engine.toggle_favorite(id).unwrap());
        assert!(!engine.is_favorite(id));
        assert!(engine.favorites().is_empty());
    }

    // -------------------------------------------------------------------------
    // Interactions
    // -------------------------------------------------------------------------

    #[test]
    fn test_message_body_is_trimmed_text() {
        let mut engine = engine();
        signed_up(&mut engine, "a@x.com");
        let id = engine.publish_product(&draft("Kamera", 900)).unwrap().unwrap();

        engine
            .send_interaction(&InteractionDraft::message(id, "  merhaba  "))
            .unwrap()
            .unwrap();
        assert_eq!(engine.thread(id)[0].body, "merhaba");

        // blank message: no-op
        assert_eq!(
            engine
                .send_interaction(&InteractionDraft::message(id, "   "))
                .unwrap(),
            None
        );
        assert_eq!(engine.state().interactions().len(), 1);
    }

    #[test]
    fn test_offer_body_format() {
        let mut engine = engine();
        signed_up(&mut engine, "a@x.com");
        let id = engine.publish_product(&draft("Kamera", 900)).unwrap().unwrap();
        let price = Price::new(Decimal::new(750, 0)).unwrap();

        engine
            .send_interaction(&InteractionDraft::offer(id, price, ""))
            .unwrap()
            .unwrap();
        assert_eq!(engine.thread(id)[0].body, "Teklif: 750 TL");

        engine
            .send_interaction(&InteractionDraft::offer(id, price, " nakit alırım "))
            .unwrap()
            .unwrap();
        assert_eq!(engine.thread(id)[1].body, "Teklif: 750 TL — nakit alırım");

        // zero amount: no-op
        assert_eq!(
            engine
                .send_interaction(&InteractionDraft::offer(id, Price::ZERO, "yine de"))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_exchange_body_format() {
        let mut engine = engine();
        signed_up(&mut engine, "a@x.com");
        let theirs = engine.publish_product(&draft("Kamera", 900)).unwrap().unwrap();
        let mine = engine.publish_product(&draft("Dağ bisikleti", 1200)).unwrap().unwrap();
        let delta = Price::new(Decimal::new(100, 0)).unwrap();

        engine
            .send_interaction(&InteractionDraft::exchange(theirs, mine, None, ""))
            .unwrap()
            .unwrap();
        assert_eq!(
            engine.thread(theirs)[0].body,
            "Takas Teklifi: \"Dağ bisikleti\""
        );

        engine
            .send_interaction(&InteractionDraft::exchange(
                theirs,
                mine,
                Some(delta),
                "temiz kullanılmış",
            ))
            .unwrap()
            .unwrap();
        assert_eq!(
            engine.thread(theirs)[1].body,
            "Takas Teklifi: \"Dağ bisikleti\" + 100 TL — Not: temiz kullanılmış"
        );
    }

    #[test]
    fn test_exchange_requires_own_product() {
        let mut engine = engine();
        signed_up(&mut engine, "seller@x.com");
        let sellers = engine.publish_product(&draft("Kamera", 900)).unwrap().unwrap();
        engine.log_out();

        signed_up(&mut engine, "buyer@x.com");
        // referencing the seller's product as the offered item: no-op
        let result = engine
            .send_interaction(&InteractionDraft::exchange(sellers, sellers, None, ""))
            .unwrap();
        assert_eq!(result, None);
        assert!(engine.state().interactions().is_empty());
    }

    #[test]
    fn test_interaction_on_missing_product() {
        let mut engine = engine();
        signed_up(&mut engine, "a@x.com");
        assert!(matches!(
            engine.send_interaction(&InteractionDraft::message(ProductId::new(404), "selam")),
            Err(EngineError::NotFound(NotFoundError::Product(_)))
        ));
    }

    // -------------------------------------------------------------------------
    // Config and reset
    // -------------------------------------------------------------------------

    #[test]
    fn test_update_config_clamps_radius() {
        let mut engine = engine();
        engine.update_config(|ui| ui.max_distance_km = 42);
        assert_eq!(engine.state().ui().max_distance_km, 10);
        assert!(engine.blob_store().document(keys::UI).is_some());
    }

    #[test]
    fn test_reset_all_preserves_accounts_and_session() {
        let mut engine = engine();
        let id = signed_up(&mut engine, "a@x.com");
        engine.publish_product(&draft("Kamera", 900)).unwrap().unwrap();
        engine.update_config(|ui| ui.takas_only = true);

        engine.reset_all();

        assert!(engine.state().products().is_empty());
        assert!(engine.state().interactions().is_empty());
        assert_eq!(*engine.state().ui(), UiConfig::default());
        assert_eq!(engine.state().session(), Session::Authenticated(id));
        assert_eq!(engine.state().users().len(), 1);
        assert!(engine.blob_store().document(keys::PRODUCTS).is_none());
        assert!(engine.blob_store().document(keys::USERS).is_some());
    }
}
