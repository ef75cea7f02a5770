//! Malicious-secure multi-party verification of digital signatures, and a
//! private-set-intersection protocol built on top of it.
//!
//! `n` mutually distrusting parties each hold an additive secret share of a
//! signature (and its associated public material: hashed message, public
//! key). Without ever reconstructing the signature on one machine, the
//! parties jointly decide whether it is valid. [`psi`] then composes that
//! verification step with secret multiplications to compute the
//! intersection of identity sets across parties, revealing only the
//! identities the sets have in common.
//!
//! The engine is organized bottom-up:
//! * [`context`] — per-run party set and SPDZ MAC key (`SystemCtx` for the
//!   pairing domain, `EccSystemCtx` for `secp256k1`).
//! * [`bandwidth`] — byte accounting and an optional WAN rate limiter; every
//!   emission in the layers above is routed through it.
//! * [`commitment`] — the hiding/binding commitment used inside every
//!   `MacCheck`.
//! * [`group`] — the additive share layer (`Share<G>`) and its local/linear
//!   operations, generic over any [`group::GroupElem`]; also `ExpP1`,
//!   `ExpP2`, `ExpS`.
//! * [`domains`] — the four concrete `GroupElem` implementations: `E`
//!   (`secp256k1`), `G1`, `G2`, `G_T`.
//! * [`fp`] / [`fp_mul`] — the scalar field `F_p`, additive and
//!   multiplicative MAC variants, Beaver multiplication and squaring.
//! * [`pairing`] — `PairP1`, `PairP2`, `PairS`.
//! * [`preprocessing`] — triple/square/random-share generation ("offline"
//!   phase).
//! * [`basic_bls`], [`basic_ecdsa`], [`basic_aibs`] — the plaintext signature
//!   schemes, consumed as external algorithms before sharing.
//! * [`secver`] — the three in-share verification recipes.
//! * [`psi`] — two-party and multi-party private identity intersection.
//! * [`hashtable`] — cuckoo and bucketed-simple hash tables used by
//!   bandwidth-sensitive PSI variants.
//!
//! Verification should follow the standards the plaintext schemes are drawn
//! from, e.g. BLS per
//! [draft-irtf-cfrg-bls-signature-04](https://tools.ietf.org/html/draft-irtf-cfrg-bls-signature-04).
//! This library should only be used by applications that follow those
//! standards themselves.

pub mod bandwidth;
pub mod basic_aibs;
pub mod basic_bls;
pub mod basic_ecdsa;
pub mod commitment;
pub mod context;
pub mod domains;
pub mod fp;
pub mod fp_mul;
pub mod group;
pub mod hashtable;
pub mod pairing;
pub mod preprocessing;
pub mod psi;
pub mod secver;

use thiserror::Error;

/// The crate-wide error taxonomy (see `SPEC_FULL.md` §7).
///
/// A verification-negative result (a signature that is simply invalid) is
/// never represented here: [`secver`] returns `(bool, bool)`, not a
/// `Result`. Only conditions that abort a run entirely are errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A `MacCheck` failed, or a commitment inside one failed to open.
    /// Always fatal: a party has misbehaved or a share was corrupted.
    #[error("protocol aborted: {0}")]
    ProtocolAbort(String),

    /// Bad construction-time input: `n < 2`, an empty identity set, a
    /// malformed marshaled curve point, a cuckoo table that could not place
    /// every key within the eviction bound.
    #[error("invalid input: {0}")]
    InputInvalid(String),

    /// A resource could not be constructed, e.g. a WAN limiter with
    /// `bandwidth_mbps <= 0`.
    #[error("resource error: {0}")]
    Resource(String),

    /// Propagated transparently from the underlying curve/pairing
    /// implementation.
    #[error("curve operation failed: {0}")]
    Curve(String),
}

pub type Result<T> = std::result::Result<T, Error>;
