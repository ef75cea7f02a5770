//! `PairP1`, `PairP2`, `PairS` (C8, §4.8): the pairing fragment that
//! bridges `G1 x G2 -> G_T` and so cannot be expressed through the
//! single-domain generic layer in [`crate::group`].

use curv::elliptic::curves::bls12_381::Pair;

use crate::context::MpcContext;
use crate::domains::{G1Elem, G2Elem, GtElem};
use crate::group::{self, GroupElem, Share};

fn pair_raw(a: &G1Elem, b: &G2Elem) -> GtElem {
    GtElem::from_fq12(Pair::compute_pairing(&a.0, &b.0).e)
}

/// `PairP1([a], b) -> [e(a,b)]`: local, no communication.
pub fn pair_p1(a: &[Share<G1Elem>], b: &G2Elem) -> Vec<Share<GtElem>> {
    a.iter()
        .map(|s| Share {
            share: pair_raw(&s.share, b),
            gamma: pair_raw(&s.gamma, b),
            delta: pair_raw(&s.delta, b),
            index: s.index,
        })
        .collect()
}

/// `PairP2(a, [b]) -> [e(a,b)]`: local, no communication.
pub fn pair_p2(a: &G1Elem, b: &[Share<G2Elem>]) -> Vec<Share<GtElem>> {
    b.iter()
        .map(|s| Share {
            share: pair_raw(a, &s.share),
            gamma: pair_raw(a, &s.gamma),
            delta: pair_raw(a, &s.delta),
            index: s.index,
        })
        .collect()
}

/// `PairS([a],[b]) -> [e(a,b)]`: Beaver-with-pairings (§4.8).
pub fn pair_s<C: MpcContext>(
    ctx: &C,
    a: &[Share<G1Elem>],
    b: &[Share<G2Elem>],
) -> Vec<Share<GtElem>> {
    let (fa, fb, fc) = crate::preprocessing::gen_triplet(ctx);

    let g1 = G1Elem::generator();
    let g2 = G2Elem::generator();
    let g_a = group::exp_p1::<C, G1Elem>(&g1, &fa);
    let g_b = group::exp_p1::<C, G2Elem>(&g2, &fb);
    let g_c = group::exp_p1::<C, G1Elem>(&g1, &fc);

    let v = group::sub_vec(a, &g_a);
    let w = group::sub_vec(b, &g_b);
    let v_pub = group::half_open(ctx, &v);
    let w_pub = group::half_open(ctx, &w);

    let term1 = pair_p1(&v, &w_pub);
    let term2 = pair_p1(&g_c, &g2);
    let term3 = pair_p1(&g_a, &w_pub);
    let term4 = pair_p2(&v_pub, &g_b);

    group::add_vec(&group::add_vec(&term1, &term2), &group::add_vec(&term3, &term4))
}
