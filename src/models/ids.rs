//! Strongly-typed ID wrappers
//!
//! The REST store issues opaque string ids (document keys), so these wrap a
//! `String` rather than a UUID. Records built locally before they are posted
//! get a fresh UUID v4 string.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[doc = concat!("Identifier of a ", $entity, " record")]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID for a locally-built record
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Wrap an id issued by the store
            ///
            /// Returns `None` for an empty or whitespace-only id.
            pub fn parse(s: &str) -> Option<Self> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Self(trimmed.to_string()))
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(TransactionId, "transaction");
define_id!(BudgetId, "budget");
