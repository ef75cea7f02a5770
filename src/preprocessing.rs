//! Preprocessing / "offline" phase (C7, §4.7): Beaver triples, square
//! pairs, random shares. Grounded on `original_source/mpc/preprocess.go`'s
//! `GenerateTriplet`/`GenerateSquare` — sample uniformly, derive the
//! relation in plaintext, then share offline. Sampling is infallible; no
//! batching is mandated, so each call draws fresh randomness (design note
//! §9: "the specification requires only that these draws are uniformly
//! random and fresh per use").

use curv::arithmetic::traits::Modulo;
use curv::elliptic::curves::traits::ECScalar;
use curv::BigInt;

use crate::context::MpcContext;
use crate::fp;
use crate::group::{GroupElem, Share};

/// `GenTriplet() -> ([a],[b],[c])` with `c = a*b mod q`.
pub fn gen_triplet<C: MpcContext>(
    ctx: &C,
) -> (
    Vec<Share<C::Scalar>>,
    Vec<Share<C::Scalar>>,
    Vec<Share<C::Scalar>>,
) {
    let a = C::Scalar::random();
    let b = C::Scalar::random();
    let c: C::Scalar = ECScalar::from(&BigInt::mod_mul(
        &ECScalar::to_big_int(&a),
        &ECScalar::to_big_int(&b),
        &C::Scalar::q(),
    ));

    (
        fp::share_a_offline(ctx, &a),
        fp::share_a_offline(ctx, &b),
        fp::share_a_offline(ctx, &c),
    )
}

/// `GenSquarePair() -> ([a],[a^2])`.
pub fn gen_square_pair<C: MpcContext>(ctx: &C) -> (Vec<Share<C::Scalar>>, Vec<Share<C::Scalar>>) {
    let a = C::Scalar::random();
    let a2: C::Scalar = ECScalar::from(&BigInt::mod_mul(
        &ECScalar::to_big_int(&a),
        &ECScalar::to_big_int(&a),
        &C::Scalar::q(),
    ));
    (fp::share_a_offline(ctx, &a), fp::share_a_offline(ctx, &a2))
}

/// `RandomShare()` for any `GroupElem` domain: sample uniformly, share
/// offline.
pub fn random_share<C: MpcContext, G: GroupElem>(ctx: &C) -> Vec<Share<G>> {
    crate::group::share_a_offline(ctx, &G::random())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Mode, SystemCtx};

    #[test]
    fn triplet_relation_holds() {
        let ctx = SystemCtx::new(3, Mode::Malicious).unwrap();
        let (a, b, c) = gen_triplet(&ctx);
        let (a_val, _) = fp::open(&ctx, &a).unwrap();
        let (b_val, _) = fp::open(&ctx, &b).unwrap();
        let (c_val, mac_ok) = fp::open(&ctx, &c).unwrap();
        assert!(mac_ok);
        let expect = BigInt::mod_mul(
            &ECScalar::to_big_int(&a_val),
            &ECScalar::to_big_int(&b_val),
            &ctx.q(),
        );
        assert_eq!(ECScalar::to_big_int(&c_val), expect);
    }

    #[test]
    fn square_pair_relation_holds() {
        let ctx = SystemCtx::new(2, Mode::Malicious).unwrap();
        let (a, a2) = gen_square_pair(&ctx);
        let (a_val, _) = fp::open(&ctx, &a).unwrap();
        let (a2_val, mac_ok) = fp::open(&ctx, &a2).unwrap();
        assert!(mac_ok);
        let expect = BigInt::mod_mul(
            &ECScalar::to_big_int(&a_val),
            &ECScalar::to_big_int(&a_val),
            &ctx.q(),
        );
        assert_eq!(ECScalar::to_big_int(&a2_val), expect);
    }
}
