//! The four concrete [`crate::group::GroupElem`] implementations (C1's
//! `CurveOps` surface, expressed as Rust trait impls rather than a
//! boundary object — this is a library, not a process boundary).

pub mod g1;
pub mod g2;
pub mod gt;
pub mod secp;

pub use g1::G1Elem;
pub use g2::G2Elem;
pub use gt::GtElem;
pub use secp::EElem;
