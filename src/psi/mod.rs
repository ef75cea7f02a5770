//! Private Set Intersection over verified identities (C10, §4.10).

pub mod pii;

pub use pii::{pii_multi_party, pii_two_party, VerifiedElement};
