//! Bucketization utilities (C11, §4.11): cuckoo hashing and simple
//! (bucketed) hashing over `BigInt` keys, built on `twox-hash`'s xxHash64
//! as the keyed hash primitive. Neither is wired into the malicious-secure
//! PSI recipe in [`crate::psi`] — they are kept as standalone library
//! surface for the bandwidth-sensitive variants the spec describes but
//! does not mandate for C10.

mod cuckoo;
mod simple;

pub use cuckoo::CuckooTable;
pub use simple::SimpleHashTable;

fn keyed_hash(key: &[u8], seed: u64) -> u64 {
    use std::hash::Hasher;
    let mut hasher = twox_hash::XxHash64::with_seed(seed);
    hasher.write(key);
    hasher.finish()
}
