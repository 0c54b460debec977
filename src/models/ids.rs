//! Strongly-typed ID wrappers for all entity types
//!
//! Identifiers are issued by the ledger service and are opaque to this crate,
//! so they wrap a string rather than a parsed UUID. Newtypes still keep an
//! account id from being passed where a category id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Error for an empty identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("identifier cannot be empty")]
pub struct EmptyIdError;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier issued by the ledger service
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Issue a fresh identifier (used by the local ledger)
            pub fn generate() -> Self {
                Self(format!("{}{}", $prefix, Uuid::new_v4().simple()))
            }

            /// Borrow the identifier text
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Parse an identifier, rejecting blank input
            pub fn parse(s: &str) -> Result<Self, EmptyIdError> {
                let s = s.trim();
                if s.is_empty() {
                    Err(EmptyIdError)
                } else {
                    Ok(Self(s.to_string()))
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = EmptyIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(AccountId, "acc_");
define_id!(CategoryId, "cat_");
define_id!(EntryId, "txn_");
define_id!(UserId, "usr_");
