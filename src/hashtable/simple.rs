//! Simple (bucketed) hash table (§4.11): `ceil(1.3*n)` buckets, `h` keyed
//! hashes per key, padded to the longest bucket with uniform dummy keys
//! so bucket lengths don't leak set membership across a PSI round.

use curv::arithmetic::traits::{Converter, Samplable};
use curv::BigInt;

pub struct SimpleHashTable {
    num_buckets: usize,
    hash_count: u64,
    buckets: Vec<Vec<BigInt>>,
}

impl SimpleHashTable {
    pub fn new(n: usize, hash_count: u64) -> Self {
        let num_buckets = ((1.3_f64 * n as f64).ceil() as usize).max(1);
        SimpleHashTable {
            num_buckets,
            hash_count,
            buckets: vec![Vec::new(); num_buckets],
        }
    }

    pub fn num_buckets(&self) -> usize {
        self.num_buckets
    }

    fn slot(&self, key: &BigInt, hash_id: u64) -> usize {
        (super::keyed_hash(&BigInt::to_bytes(key), hash_id) as usize) % self.num_buckets
    }

    pub fn insert(&mut self, key: &BigInt) {
        for seed in 1..=self.hash_count {
            let idx = self.slot(key, seed);
            self.buckets[idx].push(key.clone());
        }
    }

    /// Pads every bucket to the length of the longest one with random
    /// dummy keys, so a caller iterating buckets sees uniform lengths.
    pub fn pad_to_uniform_length(&mut self) {
        let max_len = self.buckets.iter().map(Vec::len).max().unwrap_or(0);
        for bucket in &mut self.buckets {
            while bucket.len() < max_len {
                bucket.push(BigInt::sample(256));
            }
        }
    }

    pub fn buckets(&self) -> &[Vec<BigInt>] {
        &self.buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_buckets_is_130_percent_of_n() {
        let t = SimpleHashTable::new(100, 3);
        assert_eq!(t.num_buckets(), 130);
    }

    #[test]
    fn inserted_key_lands_in_every_assigned_bucket() {
        let mut t = SimpleHashTable::new(10, 3);
        let key = BigInt::from(42);
        t.insert(&key);
        let hits: usize = t
            .buckets()
            .iter()
            .filter(|b| b.contains(&key))
            .count();
        assert!(hits >= 1 && hits <= 3);
    }

    #[test]
    fn padding_equalizes_bucket_lengths() {
        let mut t = SimpleHashTable::new(10, 3);
        for i in 0..5 {
            t.insert(&BigInt::from(i));
        }
        t.pad_to_uniform_length();
        let max_len = t.buckets().iter().map(Vec::len).max().unwrap();
        assert!(t.buckets().iter().all(|b| b.len() == max_len));
    }
}
