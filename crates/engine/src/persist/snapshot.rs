//! Defensive snapshot codec.
//!
//! Loading trusts nothing: a missing or corrupt document falls back to
//! defaults, a non-array collection document is ignored, and individual
//! malformed elements are skipped rather than failing the load. Startup
//! never fails because of bad persisted state.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{Interaction, Product, UiConfig, User};
use crate::session::Session;
use crate::store::EntityStore;

use super::{BlobStore, PersistenceError, keys};

/// Load the full snapshot from the blob store.
///
/// Any storage error is logged and treated as an absent document.
pub fn load<S: BlobStore>(store: &mut S) -> EntityStore {
    let users: Vec<User> = decode_collection(load_value(store, keys::USERS), keys::USERS);
    let mut products: Vec<Product> =
        decode_collection(load_value(store, keys::PRODUCTS), keys::PRODUCTS);
    let mut interactions: Vec<Interaction> =
        decode_collection(load_value(store, keys::INTERACTIONS), keys::INTERACTIONS);

    for product in &mut products {
        // older snapshots carried free-form distances
        if !product.distance_km.is_finite() || product.distance_km < 0.0 {
            product.distance_km = 0.0;
        }
    }

    // Drop orphans so the no-orphan invariant holds from the first frame.
    interactions.retain(|m| products.iter().any(|p| p.id == m.product_id));

    let ui = load_value(store, keys::UI)
        .map(|value| UiConfig::from_value(&value))
        .unwrap_or_default();

    let session = decode_session(load_value(store, keys::CURRENT_USER), &users);

    EntityStore::from_parts(users, session, products, interactions, ui)
}

/// Persist the user collection.
///
/// # Errors
///
/// Returns [`PersistenceError`] if encoding or the backend write fails.
pub fn save_users<S: BlobStore>(store: &mut S, users: &[User]) -> Result<(), PersistenceError> {
    save(store, keys::USERS, users)
}

/// Persist the session: the authenticated user's record, or null.
///
/// # Errors
///
/// Returns [`PersistenceError`] if encoding or the backend write fails.
pub fn save_current_user<S: BlobStore>(
    store: &mut S,
    user: Option<&User>,
) -> Result<(), PersistenceError> {
    match user {
        Some(user) => save(store, keys::CURRENT_USER, user),
        None => store.save(keys::CURRENT_USER, &Value::Null),
    }
}

/// Persist the product collection.
///
/// # Errors
///
/// Returns [`PersistenceError`] if encoding or the backend write fails.
pub fn save_products<S: BlobStore>(
    store: &mut S,
    products: &[Product],
) -> Result<(), PersistenceError> {
    save(store, keys::PRODUCTS, products)
}

/// Persist the interaction collection.
///
/// # Errors
///
/// Returns [`PersistenceError`] if encoding or the backend write fails.
pub fn save_interactions<S: BlobStore>(
    store: &mut S,
    interactions: &[Interaction],
) -> Result<(), PersistenceError> {
    save(store, keys::INTERACTIONS, interactions)
}

/// Persist the ui configuration.
///
/// # Errors
///
/// Returns [`PersistenceError`] if encoding or the backend write fails.
pub fn save_ui<S: BlobStore>(store: &mut S, ui: &UiConfig) -> Result<(), PersistenceError> {
    save(store, keys::UI, ui)
}

/// Remove the catalog documents (products, interactions, ui config).
/// Users and the session document are left untouched.
///
/// # Errors
///
/// Returns the first [`PersistenceError`] encountered.
pub fn clear_catalog<S: BlobStore>(store: &mut S) -> Result<(), PersistenceError> {
    store.remove(keys::PRODUCTS)?;
    store.remove(keys::INTERACTIONS)?;
    store.remove(keys::UI)
}

fn save<S: BlobStore, T: Serialize + ?Sized>(
    store: &mut S,
    key: &str,
    data: &T,
) -> Result<(), PersistenceError> {
    let value = serde_json::to_value(data)?;
    store.save(key, &value)
}

fn load_value<S: BlobStore>(store: &mut S, key: &str) -> Option<Value> {
    match store.load(key) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to load document, starting from defaults");
            None
        }
    }
}

/// Decode an ordered collection, skipping malformed elements.
fn decode_collection<T: DeserializeOwned>(value: Option<Value>, key: &str) -> Vec<T> {
    let Some(Value::Array(elements)) = value else {
        if value.is_some() {
            tracing::warn!(key, "expected an array document, ignoring");
        }
        return Vec::new();
    };

    let total = elements.len();
    let decoded: Vec<T> = elements
        .into_iter()
        .filter_map(|element| serde_json::from_value(element).ok())
        .collect();

    if decoded.len() < total {
        tracing::warn!(key, skipped = total - decoded.len(), "skipped malformed records");
    }
    decoded
}

/// Resolve the persisted session against the loaded user collection.
///
/// The stored record is only trusted as a pointer: the id must match a
/// loaded user, otherwise the engine starts anonymous.
fn decode_session(value: Option<Value>, users: &[User]) -> Session {
    let Some(value) = value else {
        return Session::Anonymous;
    };
    let Ok(stored) = serde_json::from_value::<User>(value) else {
        return Session::Anonymous;
    };

    if users.iter().any(|u| u.id == stored.id) {
        Session::Authenticated(stored.id)
    } else {
        tracing::warn!("persisted session references an unknown user, starting anonymous");
        Session::Anonymous
    }
}
