//! Integration tests for Lowkal.
//!
//! The test binaries in `tests/` exercise the engine end to end: full
//! account / listing / conversation flows over [`MemoryBlobStore`], and
//! reopen-from-disk flows over `FileBlobStore` in a tempdir. No external
//! services are involved.
//!
//! Run with: `cargo test -p lowkal-integration-tests`
//!
//! This library crate carries the shared fixtures.

#![cfg_attr(not(test), forbid(unsafe_code))]

use rust_decimal::Decimal;
use serde_json::Value;

use lowkal_core::{Condition, Price, ProductId, UserId};
use lowkal_engine::persist::{BlobStore, MemoryBlobStore, PersistenceError};
use lowkal_engine::{Marketplace, ProductDraft};

/// A fresh engine over an in-memory store.
#[must_use]
pub fn memory_engine() -> Marketplace<MemoryBlobStore> {
    Marketplace::open(MemoryBlobStore::new())
}

/// Sign up a user with a fixed, valid password.
///
/// # Panics
///
/// Panics if the account cannot be created; fixtures assume a fresh
/// engine.
pub fn sign_up<S: BlobStore>(
    marketplace: &mut Marketplace<S>,
    first_name: &str,
    email: &str,
) -> UserId {
    marketplace
        .sign_up(first_name, "Tester", email, "sifre123", "sifre123")
        .unwrap_or_else(|e| panic!("fixture sign-up for {email} failed: {e}"))
}

/// A complete, publishable listing draft.
#[must_use]
pub fn draft(title: &str, price_tl: i64) -> ProductDraft {
    ProductDraft {
        photo: "data:image/jpeg;base64,/9j/fixture".to_owned(),
        title: title.to_owned(),
        price: price(price_tl),
        category: "Elektronik".to_owned(),
        condition: Condition::Good,
        description: String::new(),
        takas_enabled: false,
        distance_km: 2.0,
    }
}

/// A whole-lira price.
///
/// # Panics
///
/// Panics on a negative amount.
#[must_use]
pub fn price(tl: i64) -> Price {
    Price::new(Decimal::new(tl, 0)).unwrap_or_else(|e| panic!("fixture price {tl}: {e}"))
}

/// Publish a fixture listing and return its id.
///
/// # Panics
///
/// Panics if publishing is rejected or no-ops; fixtures publish complete
/// drafts while logged in.
pub fn publish<S: BlobStore>(
    marketplace: &mut Marketplace<S>,
    title: &str,
    price_tl: i64,
) -> ProductId {
    marketplace
        .publish_product(&draft(title, price_tl))
        .unwrap_or_else(|e| panic!("fixture publish of {title} failed: {e}"))
        .unwrap_or_else(|| panic!("fixture draft for {title} was not publishable"))
}

/// A blob store whose writes can be made to fail, for exercising the
/// persistence-is-non-fatal policy.
#[derive(Debug, Default)]
pub struct FlakyBlobStore {
    inner: MemoryBlobStore,
    /// When set, every `save` and `remove` fails.
    pub fail_writes: bool,
}

impl FlakyBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last successfully written document, if any.
    #[must_use]
    pub fn document(&self, key: &str) -> Option<&Value> {
        self.inner.document(key)
    }

    fn write_error(key: &str) -> PersistenceError {
        PersistenceError::Io {
            key: key.to_owned(),
            source: std::io::Error::other("injected write failure"),
        }
    }
}

impl BlobStore for FlakyBlobStore {
    fn load(&mut self, key: &str) -> Result<Option<Value>, PersistenceError> {
        self.inner.load(key)
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(Self::write_error(key));
        }
        self.inner.save(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(Self::write_error(key));
        }
        self.inner.remove(key)
    }
}
