//! Plaintext ECDSA over `secp256k1` (§1 scope: "signature algorithms...
//! consumed as plaintext (sign, verify) algorithms before sharing").
//! Standard textbook ECDSA; grounded on the shape `original_source/ecdsa/`
//! used (`RX, RY, S, HM` as the public parts an in-share verifier needs),
//! written in the curv `ECPoint`/`ECScalar` idiom already established by
//! [`crate::basic_bls`].

#![allow(non_snake_case)]

use curv::arithmetic::traits::{Converter, Modulo};
use curv::elliptic::curves::secp256_k1::{FE, GE};
use curv::elliptic::curves::traits::{ECPoint, ECScalar};
use curv::BigInt;
use sha2::{Digest, Sha256};

pub fn hash_to_scalar_mod_n(msg: &[u8]) -> BigInt {
    let mut hasher = Sha256::new();
    hasher.update(msg);
    let digest = hasher.finalize();
    let raw = BigInt::from_bytes(&digest);
    BigInt::mod_add(&raw, &BigInt::zero(), &FE::q())
}

#[derive(Clone, Debug)]
pub struct EcdsaKeyPair {
    sk: FE,
    pub pk: GE,
}

impl EcdsaKeyPair {
    pub fn new() -> Self {
        let sk: FE = ECScalar::new_random();
        let pk = GE::generator() * &sk;
        EcdsaKeyPair { sk, pk }
    }
}

impl Default for EcdsaKeyPair {
    fn default() -> Self {
        Self::new()
    }
}

/// `(RX, RY, S)`: the plaintext parts the in-share verifier needs (§3
/// `ShareSig`). `HM` is recomputed by the caller before sharing, since the
/// share layer needs it as an `F_p` value, not bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct EcdsaSignature {
    pub rx: BigInt,
    pub ry: BigInt,
    pub s: BigInt,
}

impl EcdsaSignature {
    pub fn sign(msg: &[u8], keys: &EcdsaKeyPair) -> Self {
        let n = FE::q();
        let hm = hash_to_scalar_mod_n(msg);
        loop {
            let k: FE = ECScalar::new_random();
            let r_point = GE::generator() * &k;
            let rx = r_point.x_coor().unwrap_or_else(BigInt::zero) % &n;
            if rx == BigInt::zero() {
                continue;
            }
            let ry = r_point.y_coor().unwrap_or_else(BigInt::zero);
            let k_inv = k.invert().to_big_int();
            let sk_big = keys.sk.to_big_int();
            let s = BigInt::mod_mul(
                &k_inv,
                &BigInt::mod_add(&hm, &BigInt::mod_mul(&rx, &sk_big, &n), &n),
                &n,
            );
            if s == BigInt::zero() {
                continue;
            }
            return EcdsaSignature { rx, ry, s };
        }
    }

    pub fn verify(&self, msg: &[u8], pk: &GE) -> bool {
        let n = FE::q();
        let hm = hash_to_scalar_mod_n(msg);
        let s_fe: FE = ECScalar::from(&self.s);
        let s_inv = s_fe.invert().to_big_int();

        let u1 = BigInt::mod_mul(&hm, &s_inv, &n);
        let u2 = BigInt::mod_mul(&self.rx, &s_inv, &n);

        let u1_fe: FE = ECScalar::from(&u1);
        let u2_fe: FE = ECScalar::from(&u2);
        let point = (GE::generator() * &u1_fe) + (pk.clone() * &u2_fe);
        match point.x_coor() {
            Some(x) => x % &n == self.rx,
            None => false,
        }
    }

    /// `S^{-1} mod N`, the plaintext part the in-share recipe multiplies
    /// the shared `HM`/`pk` exponents by (§4.9).
    pub fn s_inv(&self) -> BigInt {
        let s_fe: FE = ECScalar::from(&self.s);
        s_fe.invert().to_big_int()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_verify_succeeds() {
        let keys = EcdsaKeyPair::new();
        let msg = b"hello world";
        let sig = EcdsaSignature::sign(msg, &keys);
        assert!(sig.verify(msg, &keys.pk));
    }

    #[test]
    fn tampered_message_fails_verify() {
        let keys = EcdsaKeyPair::new();
        let sig = EcdsaSignature::sign(b"hello world", &keys);
        assert!(!sig.verify(b"goodbye world", &keys.pk));
    }
}
