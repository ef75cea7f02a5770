//! In-share AIBS verification (C9, §4.9): rewrite
//! `e(S2, mpk + g2^HID) * g_T^(HM+HS1) == S1` so the shared inputs
//! (`HM`, `HID`, `HS1`) live inside shares and the check becomes
//! `[w] + [h] - S1 == 1_{G_T}`.

use curv::elliptic::curves::bls12_381::g1::{FE as FE1, GE as GE1};
use curv::elliptic::curves::bls12_381::g2::GE as GE2;
use curv::elliptic::curves::bls12_381::Pair;
use curv::elliptic::curves::traits::ECScalar;

use crate::basic_aibs::AibsSignature;
use crate::context::MpcContext;
use crate::domains::{G1Elem, G2Elem, GtElem};
use crate::fp;
use crate::group::{self, GroupElem, Share};
use crate::pairing;
use crate::Result;

fn hash_to_scalar_fe1(bytes: &[u8]) -> FE1 {
    let scalar = crate::basic_aibs::hash_to_scalar(bytes);
    ECScalar::from(&scalar)
}

/// Shares `HM`, `HID`, `HS1`.
pub fn share_a_sig<C: MpcContext<Scalar = FE1>>(
    ctx: &C,
    msg: &[u8],
    id: u64,
    sig: &AibsSignature,
) -> (Vec<Share<FE1>>, Vec<Share<FE1>>, Vec<Share<FE1>>) {
    let hm = hash_to_scalar_fe1(msg);
    let hid = hash_to_scalar_fe1(&id.to_be_bytes());
    let hs1 = hash_to_scalar_fe1(&sig.nonce);
    (
        fp::share_a(ctx, &hm),
        fp::share_a(ctx, &hid),
        fp::share_a(ctx, &hs1),
    )
}

pub fn sec_ver_without_open<C: MpcContext<Scalar = FE1>>(
    ctx: &C,
    sig: &AibsSignature,
    mpk: &GE2,
    hm_shares: &[Share<FE1>],
    hid_shares: &[Share<FE1>],
    hs1_shares: &[Share<FE1>],
) -> Vec<Share<GtElem>> {
    let g2 = G2Elem::generator();
    let g2_hid = group::exp_p1::<C, G2Elem>(&g2, hid_shares);
    let mpk_plus = group::add_plaintext(ctx, &g2_hid, &G2Elem(*mpk));

    let w = pairing::pair_p2(&G1Elem(sig.s2), &mpk_plus);

    let hm_plus_hs1 = group::add_vec(hm_shares, hs1_shares);
    let g_t = GtElem::from_fq12(Pair::compute_pairing(&GE1::generator(), &GE2::generator()).e);
    let h = group::exp_p1::<C, GtElem>(&g_t, &hm_plus_hs1);

    let q = group::add_vec(&w, &h);
    group::sub_plaintext(ctx, &q, &GtElem::from_fq12(sig.s1))
}

pub fn sec_ver<C: MpcContext<Scalar = FE1>>(
    ctx: &C,
    sig: &AibsSignature,
    msg: &[u8],
    mpk: &GE2,
    id: u64,
) -> Result<(bool, bool)> {
    let (hm_shares, hid_shares, hs1_shares) = share_a_sig(ctx, msg, id, sig);
    let q_shares = sec_ver_without_open(ctx, sig, mpk, &hm_shares, &hid_shares, &hs1_shares);
    let (q, mac_ok) = group::open(ctx, &q_shares)?;
    Ok((q.is_identity(), mac_ok))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_aibs::{user_key_gen, AibsSignature, MasterKeyPair};
    use crate::context::{Mode, SystemCtx};

    #[test]
    fn valid_signature_verifies() {
        let ctx = SystemCtx::new(3, Mode::Malicious).unwrap();
        let msk = MasterKeyPair::new();
        let id = 9567u64;
        let uk = user_key_gen(&msk, id);
        let sig = AibsSignature::sign(&uk, &msk, b"hello world");

        let (valid, mac_ok) = sec_ver(&ctx, &sig, b"hello world", &msk.mpk, id).unwrap();
        assert!(mac_ok);
        assert!(valid);
    }

    #[test]
    fn wrong_identity_is_rejected() {
        let ctx = SystemCtx::new(2, Mode::Malicious).unwrap();
        let msk = MasterKeyPair::new();
        let uk = user_key_gen(&msk, 9567);
        let sig = AibsSignature::sign(&uk, &msk, b"hello world");

        let (valid, mac_ok) = sec_ver(&ctx, &sig, b"hello world", &msk.mpk, 1111).unwrap();
        assert!(mac_ok);
        assert!(!valid);
    }
}
