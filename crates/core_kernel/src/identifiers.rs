//! Identifiers for loans and installments
//!
//! Each id wraps a UUID v7, so ids sort in the order they were generated and
//! a map keyed by id iterates in creation order. Ids print with a short
//! prefix (`LN-…`, `INS-…`) in logs and error messages and serialize as the
//! bare UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! ledger_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates an id later than every id generated before it
            pub fn generate() -> Self {
                Self(Uuid::now_v7())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}

ledger_id!(
    /// Identifies a loan
    LoanId,
    "LN"
);
ledger_id!(
    /// Identifies one installment of a loan's schedule
    InstallmentId,
    "INS"
);
