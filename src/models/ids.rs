//! Entity identifiers
//!
//! Every collection keys its rows by a UUIDv4 wrapped in a per-entity
//! newtype, so an account id can never be handed to an operation expecting a
//! transaction id. On the wire the wrapper is transparent: ids serialize as
//! plain UUID strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Draw a fresh random id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// The wrapped UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse from a canonical UUID string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        // Short prefixed form for logs and error messages; the full UUID
        // stays on the wire.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let hex = self.0.simple().to_string();
                write!(f, "{}{}", $prefix, &hex[..8])
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bare = s.strip_prefix($prefix).unwrap_or(s);
                Uuid::parse_str(bare).map(Self)
            }
        }
    };
}

entity_id!(AccountId, "acc-");
entity_id!(TransactionId, "txn-");
entity_id!(CategoryId, "cat-");
entity_id!(BudgetId, "bud-");
entity_id!(GoalId, "goal-");
