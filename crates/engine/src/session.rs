//! Session state machine.

use lowkal_core::UserId;

/// Who, if anyone, is currently authenticated.
///
/// Exactly one of the two states holds at any time. Sign-up and log-in
/// success move to `Authenticated`; log-out moves back to `Anonymous`.
/// A rejected operation never changes the state, so the caller can
/// prompt for credentials and retry the same logical action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(UserId),
}

impl Session {
    /// The authenticated user, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(id) => Some(*id),
        }
    }

    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}
