//! The `E` (`secp256k1`) `GroupElem` adapter used by in-share ECDSA
//! verification and its PSI variant.

use curv::elliptic::curves::secp256_k1::{FE, GE};
use curv::elliptic::curves::traits::{ECPoint, ECScalar};
use curv::BigInt;

use crate::group::GroupElem;

#[derive(Clone, Debug, PartialEq)]
pub struct EElem(pub GE);

impl EElem {
    pub fn from_point(p: GE) -> Self {
        EElem(p)
    }

    pub fn from_coords(x: &BigInt, y: &BigInt) -> Self {
        EElem(ECPoint::from_coor(x, y))
    }
}

impl GroupElem for EElem {
    fn identity() -> Self {
        let zero: FE = ECScalar::from(&BigInt::zero());
        EElem(GE::generator() * &zero)
    }

    fn op(&self, other: &Self) -> Self {
        EElem(self.0 + other.0)
    }

    fn neg(&self) -> Self {
        EElem(-self.0)
    }

    fn scalar_mul(&self, k: &BigInt) -> Self {
        let fe: FE = ECScalar::from(k);
        EElem(self.0 * &fe)
    }

    fn random() -> Self {
        let fe = FE::new_random();
        EElem(GE::generator() * &fe)
    }

    fn marshal(&self) -> Vec<u8> {
        self.0.pk_to_key_slice()
    }

    fn generator() -> Self {
        EElem(GE::generator())
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
        assert_ne!(EElem::random(), EElem::identity());
    }

    #[test]
    fn from_coords_round_trips_through_marshal() {
        let p = EElem::random();
        if let (Some(x), Some(y)) = (p.0.x_coor(), p.0.y_coor()) {
            let rebuilt = EElem::from_coords(&x, &y);
            assert_eq!(rebuilt.marshal(), p.marshal());
        }
    }
}
