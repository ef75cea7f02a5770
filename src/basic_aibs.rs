//! Plaintext AIBS (identity-based signature over the pairing groups),
//! consumed as an external `(sign, verify)` algorithm before sharing (§1
//! scope), grounded on the BLS12-381 pairing idiom of [`crate::basic_bls`]
//! and the Boneh-Boyen-style identity extraction the spec's `ShareSig`
//! shape (`S1 in G_T`, `S2 in G1`, `HM/HID/HS1 in F_p`) implies.
//!
//! `H1, H2, H3` (design note §9) are SHA-256 reduced mod `q`, applied to
//! the message, the identity, and a signing-time nonce respectively.

#![allow(non_snake_case)]

use curv::arithmetic::traits::{Converter, Modulo};
use curv::elliptic::curves::bls12_381::g1::{FE as FE1, GE as GE1};
use curv::elliptic::curves::bls12_381::g2::{FE as FE2, GE as GE2};
use curv::elliptic::curves::bls12_381::Pair;
use curv::elliptic::curves::traits::{ECPoint, ECScalar};
use curv::BigInt;
use ff_zeroize::Field;
use pairing_plus::bls12_381::Fq12;
use sha2::{Digest, Sha256};

pub fn hash_to_scalar(msg: &[u8]) -> BigInt {
    let mut hasher = Sha256::new();
    hasher.update(msg);
    let digest = hasher.finalize();
    BigInt::mod_add(&BigInt::from_bytes(&digest), &BigInt::zero(), &FE1::q())
}

fn pow(base: &Fq12, k: &BigInt) -> Fq12 {
    let mut result = Fq12::one();
    if k.is_zero() {
        return result;
    }
    for bit in k.to_str_radix(2).chars() {
        result.square();
        if bit == '1' {
            result.mul_assign(base);
        }
    }
    result
}

#[derive(Clone, Debug)]
pub struct MasterKeyPair {
    msk: FE2,
    pub mpk: GE2,
}

impl MasterKeyPair {
    pub fn new() -> Self {
        let msk: FE2 = ECScalar::new_random();
        let mpk = GE2::generator() * &msk;
        MasterKeyPair { msk, mpk }
    }
}

impl Default for MasterKeyPair {
    fn default() -> Self {
        Self::new()
    }
}

/// A user's identity-extracted key `S2 = g1^{1/(msk+H(id))}`.
#[derive(Clone, Debug)]
pub struct UserKey {
    pub point: GE1,
}

pub fn user_key_gen(msk: &MasterKeyPair, id: u64) -> UserKey {
    let hid = hash_to_scalar(&id.to_be_bytes());
    let denom = BigInt::mod_add(&ECScalar::to_big_int(&msk.msk), &hid, &FE2::q());
    let denom_fe: FE1 = ECScalar::from(&denom);
    let point = GE1::generator() * &denom_fe.invert();
    UserKey { point }
}

#[derive(Clone, Debug)]
pub struct AibsSignature {
    pub s1: Fq12,
    pub s2: GE1,
    pub nonce: [u8; 32],
}

impl AibsSignature {
    pub fn sign(uk: &UserKey, mpk: &MasterKeyPair, msg: &[u8]) -> Self {
        let hm = hash_to_scalar(msg);
        let mut nonce = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut nonce);
        let hs1 = hash_to_scalar(&nonce);
        let exponent = BigInt::mod_add(
            &BigInt::from(1),
            &BigInt::mod_add(&hm, &hs1, &FE1::q()),
            &FE1::q(),
        );
        let g_t = Pair::compute_pairing(&GE1::generator(), &GE2::generator()).e;
        let s1 = pow(&g_t, &exponent);
        let _ = mpk;
        AibsSignature {
            s1,
            s2: uk.point,
            nonce,
        }
    }

    pub fn verify(&self, msg: &[u8], mpk: &MasterKeyPair, id: u64) -> bool {
        let hm = hash_to_scalar(msg);
        let hid = hash_to_scalar(&id.to_be_bytes());
        let hs1 = hash_to_scalar(&self.nonce);

        let hid_fe: FE2 = ECScalar::from(&hid);
        let shifted_mpk = mpk.mpk + (GE2::generator() * &hid_fe);
        let w = Pair::compute_pairing(&self.s2, &shifted_mpk).e;

        let exponent = BigInt::mod_add(&hm, &hs1, &FE1::q());
        let g_t = Pair::compute_pairing(&GE1::generator(), &GE2::generator()).e;
        let h = pow(&g_t, &exponent);

        let mut expect = w;
        expect.mul_assign(&h);
        expect == self.s1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_verify_succeeds() {
        let msk = MasterKeyPair::new();
        let id = 9567u64;
        let uk = user_key_gen(&msk, id);
        let sig = AibsSignature::sign(&uk, &msk, b"hello world");
        assert!(sig.verify(b"hello world", &msk, id));
    }

    #[test]
    fn wrong_identity_fails_verify() {
        let msk = MasterKeyPair::new();
        let uk = user_key_gen(&msk, 9567);
        let sig = AibsSignature::sign(&uk, &msk, b"hello world");
        assert!(!sig.verify(b"hello world", &msk, 1111));
    }
}
