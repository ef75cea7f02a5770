//! The `G2` `GroupElem` adapter (public-key group for BLS, master-key
//! group for AIBS).

use curv::elliptic::curves::bls12_381::g2::{FE as FE2, GE as GE2};
use curv::elliptic::curves::traits::{ECPoint, ECScalar};
use curv::BigInt;
use pairing_plus::bls12_381::G2Affine;
use pairing_plus::serdes::SerDes;

use crate::group::GroupElem;

#[derive(Clone, Debug, PartialEq)]
pub struct G2Elem(pub GE2);

impl G2Elem {
    pub fn from_point(p: GE2) -> Self {
        G2Elem(p)
    }
}

impl GroupElem for G2Elem {
    fn identity() -> Self {
        let zero: FE2 = ECScalar::from(&BigInt::zero());
        G2Elem(GE2::generator() * &zero)
    }

    fn op(&self, other: &Self) -> Self {
        G2Elem(self.0 + other.0)
    }

    fn neg(&self) -> Self {
        G2Elem(-self.0)
    }

    fn scalar_mul(&self, k: &BigInt) -> Self {
        let fe: FE2 = ECScalar::from(k);
        G2Elem(self.0 * &fe)
    }

    fn random() -> Self {
        let fe = FE2::new_random();
        G2Elem(GE2::generator() * &fe)
    }

    fn marshal(&self) -> Vec<u8> {
        let mut out = vec![];
        G2Affine::serialize(&self.0.get_element(), &mut out, true)
            .expect("G2 serialization should always succeed");
        out
    }

    fn generator() -> Self {
        G2Elem(GE2::generator())
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
        assert_ne!(G2Elem::random(), G2Elem::identity());
    }
}
