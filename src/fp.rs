//! Additive-sharing `F_p` domain: `SecMul` (Beaver), `SecSquare`, and the
//! generic share/open surface specialized to the context's native scalar
//! (§4.5, §4.8 C5+C7, C8 fragment).
//!
//! `F_p` is not a bespoke type: it is whatever scalar field the context
//! already uses to express its MAC key (`FE1` for [`crate::context::SystemCtx`],
//! the `secp256k1` order for [`crate::context::EccSystemCtx`]), matching
//! `original_source/mpc/system.go` where `Order` is one `big.Int` shared by
//! every `F_p` operation in that system.

use curv::arithmetic::traits::{Converter, Modulo};
use curv::elliptic::curves::bls12_381::g1::FE as FE1;
use curv::elliptic::curves::secp256_k1::FE as FEEcc;
use curv::elliptic::curves::traits::ECScalar;
use curv::BigInt;

use crate::context::MpcContext;
use crate::group::{self, GroupElem, Share};
use crate::preprocessing;
use crate::Result;

fn scalar_identity<S: ECScalar<SecretKey = BigInt>>() -> S {
    ECScalar::from(&BigInt::zero())
}

fn scalar_add<S: ECScalar<SecretKey = BigInt>>(a: &S, b: &S) -> S {
    ECScalar::from(&BigInt::mod_add(&a.to_big_int(), &b.to_big_int(), &S::q()))
}

fn scalar_neg<S: ECScalar<SecretKey = BigInt>>(a: &S) -> S {
    ECScalar::from(&BigInt::mod_sub(&BigInt::zero(), &a.to_big_int(), &S::q()))
}

fn scalar_scale<S: ECScalar<SecretKey = BigInt>>(a: &S, k: &BigInt) -> S {
    ECScalar::from(&BigInt::mod_mul(&a.to_big_int(), k, &S::q()))
}

macro_rules! impl_group_elem_for_scalar {
    ($t:ty) => {
        impl GroupElem for $t {
            fn identity() -> Self {
                scalar_identity()
            }
            fn op(&self, other: &Self) -> Self {
                scalar_add(self, other)
            }
            fn neg(&self) -> Self {
                scalar_neg(self)
            }
            fn scalar_mul(&self, k: &BigInt) -> Self {
                scalar_scale(self, k)
            }
            fn random() -> Self {
                <$t as ECScalar>::new_random()
            }
            fn marshal(&self) -> Vec<u8> {
                BigInt::to_bytes(&self.to_big_int())
            }
            fn generator() -> Self {
                ECScalar::from(&BigInt::from(1))
            }
            fn is_identity(&self) -> bool {
                self.to_big_int() == BigInt::zero()
            }
        }
    };
}

impl_group_elem_for_scalar!(FE1);
impl_group_elem_for_scalar!(FEEcc);

pub fn share_a<C: MpcContext>(ctx: &C, v: &C::Scalar) -> Vec<Share<C::Scalar>> {
    group::share_a(ctx, v)
}

pub fn share_a_offline<C: MpcContext>(ctx: &C, v: &C::Scalar) -> Vec<Share<C::Scalar>> {
    group::share_a_offline(ctx, v)
}

pub fn add<C: MpcContext>(a: &[Share<C::Scalar>], b: &[Share<C::Scalar>]) -> Vec<Share<C::Scalar>> {
    group::add_vec(a, b)
}

pub fn sub<C: MpcContext>(a: &[Share<C::Scalar>], b: &[Share<C::Scalar>]) -> Vec<Share<C::Scalar>> {
    group::sub_vec(a, b)
}

pub fn scalar_plaintext_mul<C: MpcContext>(
    a: &[Share<C::Scalar>],
    k: &BigInt,
) -> Vec<Share<C::Scalar>> {
    a.iter().map(|s| group::scalar_plaintext_mul(s, k)).collect()
}

pub fn half_open<C: MpcContext>(ctx: &C, shares: &[Share<C::Scalar>]) -> C::Scalar {
    group::half_open(ctx, shares)
}

pub fn mac_check<C: MpcContext>(
    ctx: &C,
    shares: &[Share<C::Scalar>],
    reconstructed: &C::Scalar,
) -> Result<bool> {
    group::mac_check(ctx, shares, reconstructed)
}

pub fn open<C: MpcContext>(ctx: &C, shares: &[Share<C::Scalar>]) -> Result<(C::Scalar, bool)> {
    group::open(ctx, shares)
}

/// `SecMul([x],[y]) -> [z]` via Beaver triple (§4.8).
pub fn sec_mul<C: MpcContext>(
    ctx: &C,
    x: &[Share<C::Scalar>],
    y: &[Share<C::Scalar>],
) -> Vec<Share<C::Scalar>> {
    let (a, b, c) = preprocessing::gen_triplet(ctx);

    let e = sub::<C>(x, &a);
    let f = sub::<C>(y, &b);
    let e_pub = half_open(ctx, &e);
    let f_pub = half_open(ctx, &f);

    let ef = scalar_scale(&e_pub, &f_pub.to_big_int());
    let ef_shares = share_a(ctx, &ef);

    let e_b = scalar_plaintext_mul::<C>(&b, &e_pub.to_big_int());
    let f_a = scalar_plaintext_mul::<C>(&a, &f_pub.to_big_int());

    group::add_vec(&group::add_vec(&c, &ef_shares), &group::add_vec(&e_b, &f_a))
}

/// `SecSquare([x]) -> [x^2]` via a preprocessed square pair (§4.8).
pub fn sec_square<C: MpcContext>(ctx: &C, x: &[Share<C::Scalar>]) -> Vec<Share<C::Scalar>> {
    let (a, a2) = preprocessing::gen_square_pair(ctx);

    let e = sub::<C>(x, &a);
    let e_pub = half_open(ctx, &e);
    let e_big = e_pub.to_big_int();

    // x^2 = (a+e)^2 = a^2 + 2*e*a + e^2
    let e2 = scalar_scale(&e_pub, &e_big);
    let e2_shares = share_a(ctx, &e2);
    let two_e = BigInt::mod_mul(&BigInt::from(2), &e_big, &C::Scalar::q());
    let two_e_a = scalar_plaintext_mul::<C>(&a, &two_e);

    group::add_vec(&group::add_vec(&a2, &e2_shares), &two_e_a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Mode, SystemCtx};

    fn scalar_of(n: u64) -> FE1 {
        ECScalar::from(&BigInt::from(n))
    }

    #[test]
    fn round_trip_share_and_open() {
        let ctx = SystemCtx::new(3, Mode::Malicious).unwrap();
        let v = scalar_of(42);
        let shares = share_a(&ctx, &v);
        let (opened, mac_ok) = open(&ctx, &shares).unwrap();
        assert!(mac_ok);
        assert_eq!(opened.to_big_int(), v.to_big_int());
    }

    #[test]
    fn beaver_multiplication_is_correct() {
        let ctx = SystemCtx::new(2, Mode::Malicious).unwrap();
        let x = scalar_of(5);
        let y = scalar_of(7);
        let xs = share_a(&ctx, &x);
        let ys = share_a(&ctx, &y);
        let zs = sec_mul(&ctx, &xs, &ys);
        let (z, mac_ok) = open(&ctx, &zs).unwrap();
        assert!(mac_ok);
        assert_eq!(z.to_big_int(), BigInt::from(35));
    }

    #[test]
    fn additive_homomorphism_holds() {
        let ctx = SystemCtx::new(3, Mode::Malicious).unwrap();
        let v1 = scalar_of(11);
        let v2 = scalar_of(31);
        let s1 = share_a(&ctx, &v1);
        let s2 = share_a(&ctx, &v2);
        let sum = add::<SystemCtx>(&s1, &s2);
        let (opened, mac_ok) = open(&ctx, &sum).unwrap();
        assert!(mac_ok);
        assert_eq!(opened.to_big_int(), BigInt::from(42));
    }

    #[test]
    fn tampered_mac_is_detected() {
        let ctx = SystemCtx::new(3, Mode::Malicious).unwrap();
        let v = scalar_of(9);
        let mut shares = share_a(&ctx, &v);
        shares[0].gamma = FE1::random();
        let (_, mac_ok) = open(&ctx, &shares).unwrap();
        assert!(!mac_ok);
    }
}
