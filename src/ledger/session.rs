//! Explicit session credential
//!
//! Every call to the ledger and directory services takes a [`Session`]. There
//! is no ambient "current user": the caller builds one and passes it down.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::models::UserId;

/// The user on whose behalf a call is made, plus their bearer token
///
/// The token is zeroed when the session is dropped and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Session {
    #[zeroize(skip)]
    user: UserId,
    token: String,
}

impl Session {
    /// Create a session for `user` authenticated by `token`
    pub fn new(user: UserId, token: impl Into<String>) -> Self {
        Self {
            user,
            token: token.into(),
        }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// The bearer token, for collaborators that forward it
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether a token was supplied at all
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
