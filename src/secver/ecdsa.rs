//! In-share ECDSA verification (C9, §4.9): rewrite
//! `R == u1*G + u2*pk` (`u1 = HM*s^-1`, `u2 = RX*s^-1`) so the shared
//! inputs (`HM`, `pk`) live inside shares and the check becomes
//! `[P] - (RX,RY) == 0_E`.

use curv::arithmetic::traits::Modulo;
use curv::elliptic::curves::secp256_k1::{FE as FEEcc, GE as GEEcc};
use curv::elliptic::curves::traits::ECScalar;
use curv::BigInt;

use crate::basic_ecdsa::{hash_to_scalar_mod_n, EcdsaSignature};
use crate::context::MpcContext;
use crate::domains::EElem;
use crate::fp;
use crate::group::{self, GroupElem, Share};
use crate::Result;

/// Shares `HM` and the signer's public key.
pub fn share_a_sig<C: MpcContext<Scalar = FEEcc>>(
    ctx: &C,
    msg: &[u8],
    pk: &GEEcc,
) -> (Vec<Share<FEEcc>>, Vec<Share<EElem>>) {
    let hm = hash_to_scalar_mod_n(msg);
    let hm_fe: FEEcc = ECScalar::from(&hm);
    let hm_shares = fp::share_a(ctx, &hm_fe);
    let pk_shares = group::share_a(ctx, &EElem(*pk));
    (hm_shares, pk_shares)
}

pub fn sec_ver_without_open<C: MpcContext<Scalar = FEEcc>>(
    ctx: &C,
    sig: &EcdsaSignature,
    hm_shares: &[Share<FEEcc>],
    pk_shares: &[Share<EElem>],
) -> Vec<Share<EElem>> {
    let s_inv = sig.s_inv();
    let n = FEEcc::q();

    let u1_shares = fp::scalar_plaintext_mul::<C>(hm_shares, &s_inv);
    let u2 = BigInt::mod_mul(&sig.rx, &s_inv, &n);

    let p1 = group::exp_p2(pk_shares, &u2);
    let g = EElem::generator();
    let p2 = group::exp_p1::<C, EElem>(&g, &u1_shares);
    let p = group::add_vec(&p1, &p2);

    let r_point = EElem::from_coords(&sig.rx, &sig.ry);
    group::sub_plaintext(ctx, &p, &r_point)
}

pub fn sec_ver<C: MpcContext<Scalar = FEEcc>>(
    ctx: &C,
    sig: &EcdsaSignature,
    msg: &[u8],
    pk: &GEEcc,
) -> Result<(bool, bool)> {
    let (hm_shares, pk_shares) = share_a_sig(ctx, msg, pk);
    let r_shares = sec_ver_without_open(ctx, sig, &hm_shares, &pk_shares);
    let (r, mac_ok) = group::open(ctx, &r_shares)?;
    Ok((r.is_identity(), mac_ok))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_ecdsa::EcdsaKeyPair;
    use crate::context::{EccSystemCtx, Mode};

    #[test]
    fn valid_signature_verifies() {
        let ctx = EccSystemCtx::new(3, Mode::Malicious).unwrap();
        let keys = EcdsaKeyPair::new();
        let msg = b"hello world";
        let sig = EcdsaSignature::sign(msg, &keys);

        let (valid, mac_ok) = sec_ver(&ctx, &sig, msg, &keys.pk).unwrap();
        assert!(mac_ok);
        assert!(valid);
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let ctx = EccSystemCtx::new(2, Mode::Malicious).unwrap();
        let keys = EcdsaKeyPair::new();
        let msg = b"hello world";
        let mut sig = EcdsaSignature::sign(msg, &keys);
        sig.s = BigInt::mod_add(&sig.s, &BigInt::from(1), &FEEcc::q());

        let (valid, mac_ok) = sec_ver(&ctx, &sig, msg, &keys.pk).unwrap();
        assert!(mac_ok);
        assert!(!valid);
    }
}
