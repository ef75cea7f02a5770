//! The additive share layer (C5) generic over any algebraic domain, plus
//! `ExpP1`/`ExpP2`/`ExpS` (C8) generalized the same way (§4.5, §4.8, design
//! note §9: "express once as a trait... parametrize `Share<T>`, `SecAdd<T>`,
//! `ExpP1`, `ExpS`, and `Open` by `T`").
//!
//! A run is simulated in one process: every function here takes or returns
//! the *whole* vector of `n` per-party shares at once, mirroring
//! `original_source/mpc/system.go` where one `System` object drives every
//! party's view of a run (§3 "Lifecycle: all entities are created inside
//! one invocation").

use curv::arithmetic::traits::Converter;
use curv::BigInt;

use crate::commitment;
use crate::context::MpcContext;
use crate::preprocessing;
use crate::{Error, Result};

/// Capability set shared by `F_p`, `E`, `G1`, `G2`, `G_T` (design note §9).
/// Written additively regardless of the domain's native group law — for
/// `G_T` (and any multiplicative MAC variant), `op` is the group's
/// multiplication and `scalar_mul` is exponentiation.
pub trait GroupElem: Clone {
    fn identity() -> Self;
    fn op(&self, other: &Self) -> Self;
    fn neg(&self) -> Self;
    fn scalar_mul(&self, k: &BigInt) -> Self;
    fn random() -> Self;
    fn marshal(&self) -> Vec<u8>;
    fn generator() -> Self;
    fn is_identity(&self) -> bool;
}

/// One party's piece of a secret value (§3).
#[derive(Clone)]
pub struct Share<T> {
    pub share: T,
    pub gamma: T,
    pub delta: T,
    pub index: usize,
}

fn split<G: GroupElem>(v: &G, n: usize) -> Vec<G> {
    let mut sum = G::identity();
    let mut parts = Vec::with_capacity(n);
    for _ in 0..n - 1 {
        let r = G::random();
        sum = sum.op(&r);
        parts.push(r);
    }
    parts.push(v.op(&sum.neg()));
    parts
}

fn share_a_inner<C: MpcContext, G: GroupElem>(ctx: &C, v: &G, online: bool) -> Vec<Share<G>> {
    let n = ctx.n();
    let delta = G::random();
    if online {
        ctx.bandwidth().send(n, v.marshal().len());
        ctx.bandwidth().broadcast_n(n, delta.marshal().len());
    } else {
        ctx.bandwidth().offline_broadcast_n(n, delta.marshal().len());
    }

    let t = v.op(&delta);
    let gamma_total = t.scalar_mul(&ctx.alpha());

    let share_parts = split(v, n);
    let gamma_parts = split(&gamma_total, n);

    for i in 0..n {
        let bytes = share_parts[i].marshal().len() + gamma_parts[i].marshal().len();
        if online {
            ctx.bandwidth().send(n, bytes);
        } else {
            ctx.bandwidth().offline_send(n, bytes);
        }
    }

    (0..n)
        .map(|i| Share {
            share: share_parts[i].clone(),
            gamma: gamma_parts[i].clone(),
            delta: delta.clone(),
            index: i,
        })
        .collect()
}

/// `share_A(v) -> [Share<T>; n]` (online).
pub fn share_a<C: MpcContext, G: GroupElem>(ctx: &C, v: &G) -> Vec<Share<G>> {
    share_a_inner(ctx, v, true)
}

/// `share_A` for preprocessing: no input-publish emission, offline counter.
pub fn share_a_offline<C: MpcContext, G: GroupElem>(ctx: &C, v: &G) -> Vec<Share<G>> {
    share_a_inner(ctx, v, false)
}

fn assert_same_party<T>(a: &Share<T>, b: &Share<T>) {
    debug_assert_eq!(a.index, b.index, "combining shares from different parties");
}

pub fn add<G: GroupElem>(a: &Share<G>, b: &Share<G>) -> Share<G> {
    assert_same_party(a, b);
    Share {
        share: a.share.op(&b.share),
        gamma: a.gamma.op(&b.gamma),
        delta: a.delta.op(&b.delta),
        index: a.index,
    }
}

pub fn sub<G: GroupElem>(a: &Share<G>, b: &Share<G>) -> Share<G> {
    assert_same_party(a, b);
    Share {
        share: a.share.op(&b.share.neg()),
        gamma: a.gamma.op(&b.gamma.neg()),
        delta: a.delta.op(&b.delta.neg()),
        index: a.index,
    }
}

pub fn neg<G: GroupElem>(a: &Share<G>) -> Share<G> {
    Share {
        share: a.share.neg(),
        gamma: a.gamma.neg(),
        delta: a.delta.neg(),
        index: a.index,
    }
}

pub fn scalar_plaintext_mul<G: GroupElem>(a: &Share<G>, k: &BigInt) -> Share<G> {
    Share {
        share: a.share.scalar_mul(k),
        gamma: a.gamma.scalar_mul(k),
        delta: a.delta.scalar_mul(k),
        index: a.index,
    }
}

pub fn add_vec<G: GroupElem>(a: &[Share<G>], b: &[Share<G>]) -> Vec<Share<G>> {
    a.iter().zip(b.iter()).map(|(x, y)| add(x, y)).collect()
}

pub fn sub_vec<G: GroupElem>(a: &[Share<G>], b: &[Share<G>]) -> Vec<Share<G>> {
    a.iter().zip(b.iter()).map(|(x, y)| sub(x, y)).collect()
}

/// `add_plaintext(s, p) = add(s, share_A(p))`: requires a fresh sharing of
/// the public constant, one per party since every party needs its own
/// share of `p` (§4.5).
pub fn add_plaintext<C: MpcContext, G: GroupElem>(ctx: &C, s: &[Share<G>], p: &G) -> Vec<Share<G>> {
    add_vec(s, &share_a(ctx, p))
}

pub fn sub_plaintext<C: MpcContext, G: GroupElem>(ctx: &C, s: &[Share<G>], p: &G) -> Vec<Share<G>> {
    sub_vec(s, &share_a(ctx, p))
}

/// `halfOpen(shares) -> T`: broadcast every piece and sum. No MAC check —
/// only legal as an intermediate step inside a protocol that later
/// `Open`s (§4.5, GLOSSARY).
pub fn half_open<C: MpcContext, G: GroupElem>(ctx: &C, shares: &[Share<G>]) -> G {
    let n = ctx.n();
    for s in shares {
        ctx.bandwidth().broadcast(n, s.share.marshal().len());
    }
    shares.iter().fold(G::identity(), |acc, s| acc.op(&s.share))
}

/// `MacCheck(shares, reconstructed) -> bool`. `Err` only when a commitment
/// fails to open (wire-level corruption); a clean but nonzero MAC sum is a
/// legitimate `Ok(false)`, not an abort — `SecVer`/`Open` surface it as the
/// `mac_ok` flag (§7).
pub fn mac_check<C: MpcContext, G: GroupElem>(
    ctx: &C,
    shares: &[Share<G>],
    reconstructed: &G,
) -> Result<bool> {
    let t = reconstructed.op(&shares[0].delta);
    let mut sum = G::identity();
    for (i, s) in shares.iter().enumerate() {
        let alpha_i = curv::elliptic::curves::traits::ECScalar::to_big_int(ctx.alpha_share(i));
        let delta_i = s.gamma.op(&t.scalar_mul(&alpha_i).neg());
        let bytes = delta_i.marshal();
        let (c, r) = commitment::commit(&bytes);
        // commit-then-open, never consume delta_i before every commit is
        // visible (design note §9).
        if !commitment::open(&bytes, &c, &r) {
            tracing::warn!(party = i, "MacCheck commitment failed to open");
            return Err(Error::ProtocolAbort(format!(
                "party {} commitment failed to open during MacCheck",
                i
            )));
        }
        sum = sum.op(&delta_i);
    }
    let ok = sum.is_identity();
    tracing::debug!(mac_ok = ok, "MacCheck complete");
    Ok(ok)
}

/// `Open(shares) -> (T, bool) = halfOpen then MacCheck`.
pub fn open<C: MpcContext, G: GroupElem>(ctx: &C, shares: &[Share<G>]) -> Result<(G, bool)> {
    let reconstructed = half_open(ctx, shares);
    if !ctx.mode().is_malicious() {
        return Ok((reconstructed, true));
    }
    let ok = mac_check(ctx, shares, &reconstructed)?;
    Ok((reconstructed, ok))
}

fn scalar_to_bigint<S: curv::elliptic::curves::traits::ECScalar<SecretKey = BigInt>>(s: &S) -> BigInt {
    curv::elliptic::curves::traits::ECScalar::to_big_int(s)
}

/// `ExpP1(p_public, [x]) -> [p^x]`: local, no communication (§4.8).
pub fn exp_p1<C: MpcContext, G: GroupElem>(p: &G, x: &[Share<C::Scalar>]) -> Vec<Share<G>> {
    x.iter()
        .map(|xi| Share {
            share: p.scalar_mul(&scalar_to_bigint(&xi.share)),
            gamma: p.scalar_mul(&scalar_to_bigint(&xi.gamma)),
            delta: p.scalar_mul(&scalar_to_bigint(&xi.delta)),
            index: xi.index,
        })
        .collect()
}

/// `ExpP2([p], x_public) -> [x*p]`: local, no communication (§4.8).
pub fn exp_p2<G: GroupElem>(p: &[Share<G>], x: &BigInt) -> Vec<Share<G>> {
    p.iter().map(|pi| scalar_plaintext_mul(pi, x)).collect()
}

/// `ExpSShare([p], [x]) -> [x*p]`: two-party-pattern Beaver over any
/// domain `G` (§4.8). Works identically on `E`, `G1`, `G2`, `G_T`.
pub fn exp_s<C: MpcContext, G: GroupElem>(
    ctx: &C,
    p: &[Share<G>],
    x: &[Share<C::Scalar>],
) -> Vec<Share<G>> {
    let (a, b, c) = preprocessing::gen_triplet(ctx);
    let g = G::generator();
    let g_b = exp_p1::<C, G>(&g, &b);
    let g_c = exp_p1::<C, G>(&g, &c);

    let x_minus_a = crate::fp::sub(x, &a);
    let t = sub_vec(p, &g_b);

    let xmina_pub = crate::fp::half_open(ctx, &x_minus_a);
    let tpub = half_open(ctx, &t);

    let term1 = g_c;
    let term2 = exp_p2(&g_b, &xmina_pub);
    let term3 = exp_p1::<C, G>(&tpub, &a);
    let term4 = exp_p1::<C, G>(&tpub, &x_minus_a);

    add_vec(&add_vec(&term1, &term2), &add_vec(&term3, &term4))
}
