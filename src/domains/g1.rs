//! The `G1` `GroupElem` adapter over `curv-kzen`'s BLS12-381 `G1` point
//! (the external `CurveOps` collaborator of §4.1, C1, expressed as a trait
//! impl since this is a library).

use curv::arithmetic::traits::Converter;
use curv::elliptic::curves::bls12_381::g1::{FE as FE1, GE as GE1};
use curv::elliptic::curves::traits::{ECPoint, ECScalar};
use curv::BigInt;
use pairing_plus::bls12_381::G1Affine;
use pairing_plus::serdes::SerDes;

use crate::group::GroupElem;

#[derive(Clone, Debug, PartialEq)]
pub struct G1Elem(pub GE1);

impl G1Elem {
    pub fn from_point(p: GE1) -> Self {
        G1Elem(p)
    }

    pub fn hash_to_curve(msg: &[u8]) -> Self {
        G1Elem(GE1::hash_to_curve(msg))
    }
}

impl GroupElem for G1Elem {
    fn identity() -> Self {
        let zero: FE1 = ECScalar::from(&BigInt::zero());
        G1Elem(GE1::generator() * &zero)
    }

    fn op(&self, other: &Self) -> Self {
        G1Elem(self.0 + other.0)
    }

    fn neg(&self) -> Self {
        G1Elem(-self.0)
    }

    fn scalar_mul(&self, k: &BigInt) -> Self {
        let fe: FE1 = ECScalar::from(k);
        G1Elem(self.0 * &fe)
    }

    fn random() -> Self {
        let fe = FE1::new_random();
        G1Elem(GE1::generator() * &fe)
    }

    fn marshal(&self) -> Vec<u8> {
        let mut out = vec![];
        G1Affine::serialize(&self.0.get_element(), &mut out, true)
            .expect("G1 serialization should always succeed");
        out
    }

    fn generator() -> Self {
        G1Elem(GE1::generator())
    }

    fn is_identity(&self) -> bool {
        self.marshal() == Self::identity().marshal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_point_is_not_identity() {
        assert_ne!(G1Elem::random(), G1Elem::identity());
    }

    #[test]
    fn scalar_mul_by_zero_is_identity() {
        let p = G1Elem::random();
        assert_eq!(p.scalar_mul(&BigInt::zero()), G1Elem::identity());
    }
}
