//! Private Intersection of Identities (C10, §4.10): two-party `PII` and
//! multi-party `PIIv`, generic over the verification domain `G` (`G_T`
//! for BLS/AIBS, `E` for ECDSA — "BLS and ECDSA variants operate on the
//! corresponding groups... with a parallel recipe").
//!
//! Parallelism follows §5: each `(i,j)` pair runs on its own worker via
//! `rayon`, and workers append winners through the single `RwLock`-guarded
//! accumulator §5 calls for ("one RW-mutex only around the PSI
//! intersection accumulator").

use curv::elliptic::curves::traits::ECScalar;
use curv::BigInt;
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::context::MpcContext;
use crate::fp;
use crate::group::{self, GroupElem, Share};
use crate::preprocessing;
use crate::{Error, Result};

/// One party's bundle for one set element: its identity share and the
/// already-computed (unopened) signature-verification share in the
/// target domain `G`. Constructing one of these implies the caller has
/// already run the matching `secver::*::share_a_sig` +
/// `sec_ver_without_open` pair — `pii_*` never re-derives verification.
pub struct VerifiedElement<S, G> {
    pub hid: Vec<Share<S>>,
    pub ver: Vec<Share<G>>,
}

fn pii_pair<C: MpcContext, G: GroupElem>(
    ctx: &C,
    lift_base: &G,
    a: &VerifiedElement<C::Scalar, G>,
    b: &VerifiedElement<C::Scalar, G>,
) -> Result<Option<BigInt>> {
    let v = fp::sub::<C>(&a.hid, &b.hid);
    let w = group::exp_p1::<C, G>(lift_base, &v);
    let w = group::add_vec(&group::add_vec(&w, &a.ver), &b.ver);

    let seed = preprocessing::random_share::<C, C::Scalar>(ctx);
    let w = group::exp_s(ctx, &w, &seed);

    let (opened, mac_ok) = group::open(ctx, &w)?;
    if mac_ok && opened.is_identity() {
        let (hid_val, hid_mac_ok) = fp::open(ctx, &a.hid)?;
        if hid_mac_ok {
            return Ok(Some(ECScalar::to_big_int(&hid_val)));
        }
    }
    Ok(None)
}

/// Two-party `PII` (§4.10): returns the plaintext intersection of
/// party0's identities with party1's. `lift_base` is the generator the
/// `ExpP1` lift exponentiates — `e(g1,g2)` for BLS/AIBS, the curve
/// generator for ECDSA. It is NOT `G::generator()`: `G_T`'s `GroupElem`
/// impl can't produce the real pairing generator on its own (see
/// `domains::gt::GtElem::generator`), so callers pass it explicitly.
pub fn pii_two_party<C: MpcContext, G: GroupElem>(
    ctx: &C,
    lift_base: &G,
    party0: &[VerifiedElement<C::Scalar, G>],
    party1: &[VerifiedElement<C::Scalar, G>],
) -> Result<Vec<BigInt>>
where
    C: Sync,
    C::Scalar: Send + Sync,
    G: Send + Sync,
{
    let acc: RwLock<Vec<BigInt>> = RwLock::new(Vec::new());
    let first_err: RwLock<Option<Error>> = RwLock::new(None);

    let pairs: Vec<(usize, usize)> = (0..party0.len())
        .flat_map(|i| (0..party1.len()).map(move |j| (i, j)))
        .collect();

    pairs.par_iter().for_each(|&(i, j)| {
        match pii_pair(ctx, lift_base, &party0[i], &party1[j]) {
            Ok(Some(id)) => acc.write().push(id),
            Ok(None) => {}
            Err(e) => {
                let mut slot = first_err.write();
                if slot.is_none() {
                    *slot = Some(e);
                }
            }
        }
    });

    if let Some(e) = first_err.into_inner() {
        return Err(e);
    }
    Ok(acc.into_inner())
}

fn pii_multi_pair<C: MpcContext, G: GroupElem>(
    ctx: &C,
    lift_base: &G,
    elem0: &VerifiedElement<C::Scalar, G>,
    others: &[Vec<VerifiedElement<C::Scalar, G>>],
) -> Result<Option<BigInt>> {
    let mut product: Option<Vec<Share<C::Scalar>>> = None;
    for party_k in others {
        for elem_k in party_k {
            let diff = fp::sub::<C>(&elem0.hid, &elem_k.hid);
            product = Some(match product {
                None => diff,
                Some(running) => fp::sec_mul(ctx, &running, &diff),
            });
        }
    }
    let product = match product {
        Some(p) => p,
        None => return Ok(None),
    };

    let lifted = group::exp_p1::<C, G>(lift_base, &product);
    let seed = preprocessing::random_share::<C, C::Scalar>(ctx);
    let randomized = group::exp_s(ctx, &lifted, &seed);

    let (opened, mac_ok) = group::open(ctx, &randomized)?;
    if mac_ok && opened.is_identity() {
        let (hid_val, hid_mac_ok) = fp::open(ctx, &elem0.hid)?;
        if hid_mac_ok {
            return Ok(Some(ECScalar::to_big_int(&hid_val)));
        }
    }
    Ok(None)
}

/// Multi-party `PIIv` (§4.10): for each of party0's elements, returns it
/// iff it is present in every other party's set. `O(|S0| * sum(|Sk|))`.
pub fn pii_multi_party<C: MpcContext, G: GroupElem>(
    ctx: &C,
    lift_base: &G,
    party0: &[VerifiedElement<C::Scalar, G>],
    others: &[Vec<VerifiedElement<C::Scalar, G>>],
) -> Result<Vec<BigInt>>
where
    C: Sync,
    C::Scalar: Send + Sync,
    G: Send + Sync,
{
    let acc: RwLock<Vec<BigInt>> = RwLock::new(Vec::new());
    let first_err: RwLock<Option<Error>> = RwLock::new(None);

    party0.par_iter().for_each(|elem0| {
        match pii_multi_pair(ctx, lift_base, elem0, others) {
            Ok(Some(id)) => acc.write().push(id),
            Ok(None) => {}
            Err(e) => {
                let mut slot = first_err.write();
                if slot.is_none() {
                    *slot = Some(e);
                }
            }
        }
    });

    if let Some(e) = first_err.into_inner() {
        return Err(e);
    }
    Ok(acc.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Mode, SystemCtx};
    use crate::domains::GtElem;
    use curv::elliptic::curves::bls12_381::g1::{FE as FE1, GE as GE1};
    use curv::elliptic::curves::bls12_381::g2::GE as GE2;
    use curv::elliptic::curves::bls12_381::Pair;

    fn scalar_of(n: u64) -> FE1 {
        ECScalar::from(&BigInt::from(n))
    }

    fn g_t() -> GtElem {
        GtElem::from_fq12(Pair::compute_pairing(&GE1::generator(), &GE2::generator()).e)
    }

    #[test]
    fn matching_identity_is_found() {
        let ctx = SystemCtx::new(2, Mode::Malicious).unwrap();
        let hid = scalar_of(777);
        let hid0 = fp::share_a(&ctx, &hid);
        let hid1 = fp::share_a(&ctx, &hid);
        let ver0 = crate::group::share_a(&ctx, &GtElem::identity());
        let ver1 = crate::group::share_a(&ctx, &GtElem::identity());

        let elem0 = VerifiedElement { hid: hid0, ver: ver0 };
        let elem1 = VerifiedElement { hid: hid1, ver: ver1 };

        let intersection = pii_two_party(&ctx, &g_t(), &[elem0], &[elem1]).unwrap();
        assert_eq!(intersection.len(), 1);
        assert_eq!(intersection[0], BigInt::from(777));
    }

    #[test]
    fn non_matching_identity_is_excluded() {
        let ctx = SystemCtx::new(2, Mode::Malicious).unwrap();
        let hid0 = fp::share_a(&ctx, &scalar_of(1));
        let hid1 = fp::share_a(&ctx, &scalar_of(2));
        let ver0 = crate::group::share_a(&ctx, &GtElem::identity());
        let ver1 = crate::group::share_a(&ctx, &GtElem::identity());

        let elem0 = VerifiedElement { hid: hid0, ver: ver0 };
        let elem1 = VerifiedElement { hid: hid1, ver: ver1 };

        let intersection = pii_two_party(&ctx, &g_t(), &[elem0], &[elem1]).unwrap();
        assert!(intersection.is_empty());
    }
}
