//! In-share BLS verification (C9, §4.9): rewrite the public verify
//! equation `e(sig.S, g2) == e(H(m), pk)` so the secret inputs
//! (`H(m)`, `pk`) live inside shares, and the equation becomes
//! `[R] - L == 0_{G_T}` where `L` is the plaintext pairing and `[R]` the
//! shared one.

use curv::elliptic::curves::bls12_381::g2::GE as GE2;
use curv::elliptic::curves::bls12_381::Pair;

use crate::basic_bls::BLSSignature;
use crate::context::MpcContext;
use crate::domains::{G1Elem, G2Elem, GtElem};
use crate::group::{self, GroupElem, Share};
use crate::pairing;
use crate::Result;

fn plaintext_pairing(sig: &BLSSignature) -> GtElem {
    GtElem::from_fq12(Pair::compute_pairing(&sig.sigma, &GE2::generator()).e)
}

/// Shares the public material a BLS in-share verification needs:
/// `H(m)` and the signer's public key. `sig.S` stays plaintext (§3
/// `ShareSig`).
pub fn share_a_sig<C: MpcContext>(
    ctx: &C,
    msg: &[u8],
    pk: &GE2,
) -> (Vec<Share<G1Elem>>, Vec<Share<G2Elem>>) {
    let hm = G1Elem::hash_to_curve(msg);
    let hm_shares = group::share_a(ctx, &hm);
    let pk_shares = group::share_a(ctx, &G2Elem(*pk));
    (hm_shares, pk_shares)
}

/// `SecVerWithoutOpen`: returns the unopened `[Q]` share vector so PSI can
/// fold it into a running product before the single controlled `Open`.
pub fn sec_ver_without_open<C: MpcContext>(
    ctx: &C,
    sig: &BLSSignature,
    hm_shares: &[Share<G1Elem>],
    pk_shares: &[Share<G2Elem>],
) -> Vec<Share<GtElem>> {
    let l = plaintext_pairing(sig);
    let r = pairing::pair_s(ctx, hm_shares, pk_shares);
    group::sub_plaintext(ctx, &r, &l)
}

/// `SecVer`: opens `[Q]` and reports `(valid, mac_ok)` (§7: check `mac_ok`
/// before trusting `valid`).
pub fn sec_ver<C: MpcContext>(
    ctx: &C,
    sig: &BLSSignature,
    msg: &[u8],
    pk: &GE2,
) -> Result<(bool, bool)> {
    let (hm_shares, pk_shares) = share_a_sig(ctx, msg, pk);
    let q_shares = sec_ver_without_open(ctx, sig, &hm_shares, &pk_shares);
    let (q, mac_ok) = group::open(ctx, &q_shares)?;
    Ok((q.is_identity(), mac_ok))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_bls::{BLSSignature, KeyPairG2};
    use crate::context::{Mode, SystemCtx};

    #[test]
    fn valid_signature_verifies() {
        let ctx = SystemCtx::new(3, Mode::Malicious).unwrap();
        let keys = KeyPairG2::new();
        let msg = b"hello world";
        let sig = BLSSignature::sign(msg, &keys);
        let pk = keys.public_key();

        let (valid, mac_ok) = sec_ver(&ctx, &sig, msg, &pk).unwrap();
        assert!(mac_ok);
        assert!(valid);
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let ctx = SystemCtx::new(2, Mode::Malicious).unwrap();
        let keys = KeyPairG2::new();
        let msg = b"hello world";
        let mut sig = BLSSignature::sign(msg, &keys);
        sig.sigma = (G1Elem(sig.sigma).op(&G1Elem::generator())).0;
        let pk = keys.public_key();

        let (valid, mac_ok) = sec_ver(&ctx, &sig, msg, &pk).unwrap();
        assert!(mac_ok);
        assert!(!valid);
    }
}
