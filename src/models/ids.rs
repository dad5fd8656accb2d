//! Strongly-typed ID wrappers for record types
//!
//! Ids are opaque to the filtering and aggregation code; they only need to be
//! stable across a dataset and distinct between record types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Deterministic ID from a small sequence number, used by fixture data
            pub fn from_seq(seq: u128) -> Self {
                Self(Uuid::from_u128(seq))
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // Trailing digits, so sequential fixture ids stay distinguishable
                let simple = self.0.simple().to_string();
                write!(f, "{}{}", $display_prefix, &simple[simple.len() - 8..])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(AccountId, "acc-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = TransactionId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("txn-"));
        assert_eq!(display.len(), 12);
        assert_eq!(TransactionId::from_seq(10).to_string(), "txn-0000000a");
    }

    #[test]
    fn test_from_seq_is_stable() {
        assert_eq!(AccountId::from_seq(3), AccountId::from_seq(3));
        assert_ne!(AccountId::from_seq(3), AccountId::from_seq(4));
        assert!(TransactionId::from_seq(1) < TransactionId::from_seq(2));
    }

    #[test]
    fn test_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: TransactionId = uuid_str.parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);

        let prefixed: TransactionId = format!("txn-{}", uuid_str).parse().unwrap();
        assert_eq!(id, prefixed);
    }

    #[test]
    fn test_id_serialization() {
        let id = TransactionId::from_seq(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000007\"");
        let back: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
