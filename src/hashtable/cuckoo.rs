//! Cuckoo hash table (§4.11): capacity `ceil(1.27*n)`, 3 keyed hashes,
//! bounded eviction chain. Grounded on the standard 3-way cuckoo
//! construction design note §9 calls for; insertion failure past the
//! eviction bound surfaces as `Error::InputInvalid` rather than growing
//! the table, matching the spec's "fixed-capacity, caller re-hashes"
//! stance.

use curv::arithmetic::traits::Converter;
use curv::BigInt;

use crate::{Error, Result};

const HASH_COUNT: u64 = 3;
const MAX_DISPLACEMENTS: usize = 500;

pub struct CuckooTable {
    capacity: usize,
    buckets: Vec<Option<BigInt>>,
}

impl CuckooTable {
    pub fn new(n: usize) -> Self {
        let capacity = ((1.27_f64 * n as f64).ceil() as usize).max(1);
        CuckooTable {
            capacity,
            buckets: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn slot(&self, key: &BigInt, hash_id: u64) -> usize {
        (super::keyed_hash(&BigInt::to_bytes(key), hash_id) as usize) % self.capacity
    }

    /// Inserts `key`, evicting along a cuckoo chain up to
    /// `MAX_DISPLACEMENTS` times. Returns `Error::InputInvalid` if the
    /// chain doesn't settle — the caller should retry with fresh hash
    /// seeds or a larger table.
    pub fn insert(&mut self, key: BigInt) -> Result<()> {
        let mut current = key;
        let mut hash_id = 1u64;
        for _ in 0..MAX_DISPLACEMENTS {
            let idx = self.slot(&current, hash_id);
            match self.buckets[idx].replace(current) {
                None => return Ok(()),
                Some(evicted) => {
                    current = evicted;
                    hash_id = hash_id % HASH_COUNT + 1;
                }
            }
        }
        Err(Error::InputInvalid(
            "cuckoo table: eviction chain exceeded the displacement bound".into(),
        ))
    }

    pub fn contains(&self, key: &BigInt) -> bool {
        (1..=HASH_COUNT).any(|seed| {
            let idx = self.slot(key, seed);
            self.buckets[idx].as_ref() == Some(key)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &BigInt> {
        self.buckets.iter().filter_map(|slot| slot.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_127_percent_of_n() {
        let t = CuckooTable::new(100);
        assert_eq!(t.capacity(), 127);
    }

    #[test]
    fn inserted_keys_are_found() {
        let mut t = CuckooTable::new(16);
        let keys: Vec<BigInt> = (0..10).map(BigInt::from).collect();
        for k in &keys {
            t.insert(k.clone()).unwrap();
        }
        for k in &keys {
            assert!(t.contains(k));
        }
        assert!(!t.contains(&BigInt::from(9999)));
    }
}
