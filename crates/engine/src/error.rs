//! Unified error handling for engine operations.
//!
//! The taxonomy mirrors how operations fail: bad input (`Validation`),
//! missing or wrong identity (`Auth`), authenticated but not the owner
//! (`Permission`), stale references (`NotFound`), and storage trouble
//! (`Persistence`). The first four are synchronous operation results;
//! persistence failures are caught at the adapter boundary and logged
//! without aborting the in-memory mutation.

use thiserror::Error;

use lowkal_core::{EmailError, ProductId};

use crate::auth::AuthError;
use crate::persist::PersistenceError;

/// Top-level error type for marketplace operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or incomplete input.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Bad credentials, or a mutating action attempted while anonymous.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Authenticated, but not the owner of the target entity.
    #[error("permission error: {0}")]
    Permission(#[from] PermissionError),

    /// Reference to a nonexistent entity.
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// Storage read/write failure (non-fatal).
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Errors for malformed or incomplete input to sign-up or product fields.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The password is shorter than the minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum allowed length.
        min: usize,
    },

    /// Password and confirmation do not match.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The email is already registered (case-insensitive compare).
    #[error("email is already registered")]
    EmailTaken,

    /// The email address is malformed.
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),
}

/// Errors for ownership violations.
#[derive(Debug, Error)]
pub enum PermissionError {
    /// The caller does not own the product they tried to modify.
    #[error("product {product} is owned by another user")]
    NotOwner {
        /// The product being modified.
        product: ProductId,
    },
}

/// Errors for references to entities that do not exist.
#[derive(Debug, Error)]
pub enum NotFoundError {
    /// No product with the given id.
    #[error("product {0} does not exist")]
    Product(ProductId),
}
