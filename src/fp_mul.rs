//! Multiplicative-MAC secret sharing over `F_p^*` (C6, §4.6): a second,
//! independent MAC scheme alongside the additive one in [`crate::group`],
//! for values whose multiplicative structure matters (`SecMul_Mul`,
//! `SecDiv`). Shares *multiply* to the secret; the MAC key lives in the
//! exponent group `Z_{q-1}` — the order of `F_p^*` — not `Z_q`, matching
//! design note §9's "`Order` vs. `OrderMul`" distinction.
//!
//! Because shares multiply, `SecMul_Mul` and `SecDiv` fall out as purely
//! local, communication-free operations: `Π(x_i·y_i) = Π x_i · Π y_i`.
//! This is the mirror image of the additive domain, where addition is
//! free and multiplication needs a Beaver triple. `original_source/mpc/fpmul.go`
//! is gone from the retrieval pack (see `DESIGN.md`), so this module is
//! built directly from the literal relations §4.6 states:
//! `Πshare_i = v`, `Πγ_i = (v·Δ)^α`, `δ_i = γ_i·(v·Δ)^{-α_i}`, check
//! `Πδ_i ≡ 1`.
//!
//! Unlike the additive MAC key (baked into [`crate::context::SystemCtx`]/
//! [`crate::context::EccSystemCtx`] for the lifetime of a run), the
//! multiplicative key is a separate, explicitly threaded [`FpMulKey`] —
//! this domain is optional library surface, not load-bearing for any
//! verification recipe, so it isn't woven into `MpcContext` itself.

use curv::arithmetic::traits::{Converter, Modulo, Samplable};
use curv::BigInt;

use crate::commitment;
use crate::context::MpcContext;
use crate::{Error, Result};

fn mod_pow(base: &BigInt, exp: &BigInt, modulus: &BigInt) -> BigInt {
    let mut result = BigInt::from(1);
    let reduced = BigInt::mod_add(base, &BigInt::zero(), modulus);
    for bit in exp.to_str_radix(2).chars() {
        result = BigInt::mod_mul(&result, &result, modulus);
        if bit == '1' {
            result = BigInt::mod_mul(&result, &reduced, modulus);
        }
    }
    result
}

fn nonzero_sample(q: &BigInt) -> BigInt {
    loop {
        let r = BigInt::sample_below(q);
        if !r.is_zero() {
            return r;
        }
    }
}

/// `Πshare_i = v`, via `n-1` random nonzero factors and a closing piece.
fn split_mul(v: &BigInt, n: usize, q: &BigInt) -> Vec<BigInt> {
    let mut product = BigInt::from(1);
    let mut parts = Vec::with_capacity(n);
    for _ in 0..n - 1 {
        let r = nonzero_sample(q);
        product = BigInt::mod_mul(&product, &r, q);
        parts.push(r);
    }
    let inv = BigInt::mod_inv(&product, q).expect("product of nonzero factors is invertible mod a prime");
    parts.push(BigInt::mod_mul(v, &inv, q));
    parts
}

/// The multiplicative MAC key, `n` additive shares of `α ∈ Z_{q-1}`.
/// Threaded explicitly through every `fp_mul` call rather than stored on
/// the context — see the module doc for why.
pub struct FpMulKey {
    alpha_shares: Vec<BigInt>,
}

impl FpMulKey {
    pub fn new<C: MpcContext>(ctx: &C) -> Self {
        let q_minus_1 = ctx.q() - BigInt::from(1);
        let n = ctx.n();
        let mut sum = BigInt::zero();
        let mut shares = Vec::with_capacity(n);
        for _ in 0..n - 1 {
            let a = BigInt::sample_below(&q_minus_1);
            sum = BigInt::mod_add(&sum, &a, &q_minus_1);
            shares.push(a);
        }
        shares.push(BigInt::mod_sub(&BigInt::zero(), &sum, &q_minus_1));
        FpMulKey { alpha_shares: shares }
    }

    fn alpha_i(&self, i: usize) -> &BigInt {
        &self.alpha_shares[i]
    }

    fn alpha(&self, q_minus_1: &BigInt) -> BigInt {
        self.alpha_shares
            .iter()
            .fold(BigInt::zero(), |acc, a| BigInt::mod_add(&acc, a, q_minus_1))
    }
}

/// One party's multiplicative share of a secret `v ∈ F_p^*`.
#[derive(Clone)]
pub struct ShareMul {
    pub share: BigInt,
    pub gamma: BigInt,
    pub delta: BigInt,
    pub index: usize,
}

/// `Share_Mul(v) -> [ShareMul; n]`. `v` must be nonzero — `F_p^*`
/// membership is a precondition, not something the scheme can share
/// around.
pub fn share_mul<C: MpcContext>(ctx: &C, key: &FpMulKey, v: &BigInt) -> Result<Vec<ShareMul>> {
    if v.is_zero() {
        return Err(Error::InputInvalid(
            "Share_Mul requires a nonzero element of F_p^*".into(),
        ));
    }
    let q = ctx.q();
    let q_minus_1 = &q - BigInt::from(1);
    let n = ctx.n();

    let delta = nonzero_sample(&q);
    let vd = BigInt::mod_mul(v, &delta, &q);
    let alpha = key.alpha(&q_minus_1);
    let global_gamma = mod_pow(&vd, &alpha, &q);

    let shares = split_mul(v, n, &q);
    let gammas = split_mul(&global_gamma, n, &q);

    Ok((0..n)
        .map(|i| ShareMul {
            share: shares[i].clone(),
            gamma: gammas[i].clone(),
            delta: delta.clone(),
            index: i,
        })
        .collect())
}

/// `SecMul_Mul([x],[y]) -> [x*y]`: local, termwise product — no
/// preprocessing, no broadcast.
pub fn sec_mul_mul<C: MpcContext>(ctx: &C, xs: &[ShareMul], ys: &[ShareMul]) -> Vec<ShareMul> {
    let q = ctx.q();
    xs.iter()
        .zip(ys.iter())
        .map(|(x, y)| ShareMul {
            share: BigInt::mod_mul(&x.share, &y.share, &q),
            gamma: BigInt::mod_mul(&x.gamma, &y.gamma, &q),
            delta: BigInt::mod_mul(&x.delta, &y.delta, &q),
            index: x.index,
        })
        .collect()
}

/// `SecDiv([x],[y]) -> [x/y]`: local, termwise quotient.
pub fn sec_div<C: MpcContext>(ctx: &C, xs: &[ShareMul], ys: &[ShareMul]) -> Result<Vec<ShareMul>> {
    let q = ctx.q();
    xs.iter()
        .zip(ys.iter())
        .map(|(x, y)| {
            let inv = |v: &BigInt| {
                BigInt::mod_inv(v, &q).ok_or_else(|| {
                    Error::InputInvalid("SecDiv: a zero share has no inverse mod q".into())
                })
            };
            Ok(ShareMul {
                share: BigInt::mod_mul(&x.share, &inv(&y.share)?, &q),
                gamma: BigInt::mod_mul(&x.gamma, &inv(&y.gamma)?, &q),
                delta: BigInt::mod_mul(&x.delta, &inv(&y.delta)?, &q),
                index: x.index,
            })
        })
        .collect()
}

/// `HalfOpenFp_Mul(shares) -> v`: broadcast every factor and multiply.
/// No MAC check, same caveat as [`crate::group::half_open`].
pub fn half_open_mul<C: MpcContext>(ctx: &C, shares: &[ShareMul]) -> BigInt {
    let q = ctx.q();
    for s in shares {
        ctx.bandwidth().broadcast(ctx.n(), BigInt::to_bytes(&s.share).len());
    }
    shares
        .iter()
        .fold(BigInt::from(1), |acc, s| BigInt::mod_mul(&acc, &s.share, &q))
}

/// `MacCheckFp_Mul(shares, reconstructed) -> bool`. `Err` only on a
/// commitment failing to open; a clean nonzero product is `Ok(false)`,
/// mirroring [`crate::group::mac_check`].
pub fn mac_check_mul<C: MpcContext>(
    ctx: &C,
    key: &FpMulKey,
    shares: &[ShareMul],
    reconstructed: &BigInt,
) -> Result<bool> {
    let q = ctx.q();
    let q_minus_1 = &q - BigInt::from(1);
    let vd = BigInt::mod_mul(reconstructed, &shares[0].delta, &q);

    let mut product = BigInt::from(1);
    for (i, s) in shares.iter().enumerate() {
        let neg_alpha_i = BigInt::mod_sub(&BigInt::zero(), key.alpha_i(i), &q_minus_1);
        let factor = mod_pow(&vd, &neg_alpha_i, &q);
        let delta_i = BigInt::mod_mul(&s.gamma, &factor, &q);

        let bytes = BigInt::to_bytes(&delta_i);
        let (c, r) = commitment::commit(&bytes);
        if !commitment::open(&bytes, &c, &r) {
            tracing::warn!(party = i, "MacCheckFp_Mul commitment failed to open");
            return Err(Error::ProtocolAbort(format!(
                "party {} commitment failed to open during MacCheckFp_Mul",
                i
            )));
        }
        product = BigInt::mod_mul(&product, &delta_i, &q);
    }
    let ok = product == BigInt::from(1);
    tracing::debug!(mac_ok = ok, "MacCheckFp_Mul complete");
    Ok(ok)
}

/// `OpenFp_Mul(shares) -> (v, bool) = HalfOpenFp_Mul then MacCheckFp_Mul`.
pub fn open_mul<C: MpcContext>(
    ctx: &C,
    key: &FpMulKey,
    shares: &[ShareMul],
) -> Result<(BigInt, bool)> {
    let reconstructed = half_open_mul(ctx, shares);
    if !ctx.mode().is_malicious() {
        return Ok((reconstructed, true));
    }
    let ok = mac_check_mul(ctx, key, shares, &reconstructed)?;
    Ok((reconstructed, ok))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Mode, SystemCtx};

    #[test]
    fn round_trip_share_and_open() {
        let ctx = SystemCtx::new(3, Mode::Malicious).unwrap();
        let key = FpMulKey::new(&ctx);
        let v = BigInt::from(17);
        let shares = share_mul(&ctx, &key, &v).unwrap();
        let (opened, mac_ok) = open_mul(&ctx, &key, &shares).unwrap();
        assert!(mac_ok);
        assert_eq!(opened, v);
    }

    #[test]
    fn zero_is_rejected_at_share_time() {
        let ctx = SystemCtx::new(2, Mode::Malicious).unwrap();
        let key = FpMulKey::new(&ctx);
        assert!(share_mul(&ctx, &key, &BigInt::zero()).is_err());
    }

    #[test]
    fn local_multiplication_is_correct() {
        let ctx = SystemCtx::new(3, Mode::Malicious).unwrap();
        let key = FpMulKey::new(&ctx);
        let x = BigInt::from(6);
        let y = BigInt::from(7);
        let xs = share_mul(&ctx, &key, &x).unwrap();
        let ys = share_mul(&ctx, &key, &y).unwrap();
        let zs = sec_mul_mul(&ctx, &xs, &ys);
        let (z, mac_ok) = open_mul(&ctx, &key, &zs).unwrap();
        assert!(mac_ok);
        assert_eq!(z, BigInt::from(42));
    }

    #[test]
    fn local_division_is_correct() {
        let ctx = SystemCtx::new(2, Mode::Malicious).unwrap();
        let key = FpMulKey::new(&ctx);
        let x = BigInt::from(42);
        let y = BigInt::from(6);
        let xs = share_mul(&ctx, &key, &x).unwrap();
        let ys = share_mul(&ctx, &key, &y).unwrap();
        let zs = sec_div(&ctx, &xs, &ys).unwrap();
        let (z, mac_ok) = open_mul(&ctx, &key, &zs).unwrap();
        assert!(mac_ok);
        assert_eq!(z, BigInt::from(7));
    }

    #[test]
    fn tampered_mac_is_detected() {
        let ctx = SystemCtx::new(3, Mode::Malicious).unwrap();
        let key = FpMulKey::new(&ctx);
        let mut shares = share_mul(&ctx, &key, &BigInt::from(9)).unwrap();
        shares[0].gamma = BigInt::mod_add(&shares[0].gamma, &BigInt::from(1), &ctx.q());
        let (_, mac_ok) = open_mul(&ctx, &key, &shares).unwrap();
        assert!(!mac_ok);
    }
}
