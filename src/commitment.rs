//! Hiding/binding byte commitment used inside every `MacCheck` (§4.2).
//!
//! Grounded on `original_source/mpc/commit.go` (`Com`/`OpenComit`): commit to
//! `m` by hashing it together with fresh randomness, open by recomputing the
//! hash and comparing. Binding follows from SHA-256 collision resistance,
//! hiding from the randomness of `r`. The teacher's own
//! `HashCommitment::create_commitment_with_user_defined_randomness`
//! (`curv::cryptographic_primitives::commitments::hash_commitment`, used in
//! `threshold_bls/party_i.rs` before it was trimmed) follows the same shape;
//! this is a standalone re-implementation over raw bytes since `MacCheck`
//! commits to domain-specific marshaled values, not curve points alone.

use curv::arithmetic::traits::{Converter, Samplable};
use curv::BigInt;
use sha2::{Digest, Sha256};

const RANDOMNESS_BITS: usize = 256;

/// A 32-byte SHA-256 commitment.
pub type Commitment = [u8; 32];

/// `commit(m) -> (c, r)`: sample `r` uniformly, output `c = SHA-256(m || r)`.
pub fn commit(msg: &[u8]) -> (Commitment, BigInt) {
    let r = BigInt::sample(RANDOMNESS_BITS);
    (hash_with_randomness(msg, &r), r)
}

/// `open(m, c, r) -> bool`: recompute the hash and compare.
pub fn open(msg: &[u8], c: &Commitment, r: &BigInt) -> bool {
    hash_with_randomness(msg, r) == *c
}

fn hash_with_randomness(msg: &[u8], r: &BigInt) -> Commitment {
    let mut hasher = Sha256::new();
    hasher.update(msg);
    hasher.update(BigInt::to_bytes(r));
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_then_open_succeeds() {
        let msg = b"delta share bytes";
        let (c, r) = commit(msg);
        assert!(open(msg, &c, &r));
    }

    #[test]
    fn tampered_message_fails_to_open() {
        let (c, r) = commit(b"original");
        assert!(!open(b"tampered", &c, &r));
    }

    #[test]
    fn tampered_commitment_fails_to_open() {
        let (mut c, r) = commit(b"original");
        c[0] ^= 0xff;
        assert!(!open(b"original", &c, &r));
    }
}
