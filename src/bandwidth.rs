//! Byte accounting and optional WAN simulation (§4.3).
//!
//! Every byte logically placed on the wire increments an atomic counter,
//! split into online (`com`) and offline/preprocessing (`offline_com`)
//! totals, matching `original_source/mpc/system.go`'s `Com`/`OfflineCom`
//! fields and its `Send`/`Broadcast`/`BroadcastN` (and `Offline*` variants)
//! methods. The atomic-counter idiom follows the pack's own convention for
//! shared run counters (e.g.
//! `aptos-labs-aptos-core/consensus/src/pipeline/tests/auxiliary_info_storage_test.rs`'s
//! `Arc<AtomicU64>` version counter).
//!
//! The WAN limiter is one shared atomic timestamp (`next_free_at`) advanced
//! by compare-and-swap, per §9: a failed CAS re-reads and recomputes
//! `start = max(now, next_free_at)` and retries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::{Error, Result};

const WAN_CONSTANT_DELAY_NS: u64 = 20_000_000; // 20ms per emission

/// How many parties an emission reaches, used to scale the byte count that
/// gets added to the counter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Emission {
    /// To exactly one other party.
    Send,
    /// To every other party (`n - 1`).
    Broadcast,
    /// To every party including the sender (`n`).
    BroadcastN,
}

impl Emission {
    fn multiplier(self, party_count: usize) -> usize {
        match self {
            Emission::Send => 1,
            Emission::Broadcast => party_count - 1,
            Emission::BroadcastN => party_count,
        }
    }
}

/// A token-bucket WAN rate limiter shared by every party in a run.
pub struct WanLimiter {
    bandwidth_bps: f64,
    next_free_at_ns: AtomicU64,
    start: Instant,
}

impl WanLimiter {
    pub fn new(bandwidth_mbps: f64) -> Result<Self> {
        if bandwidth_mbps <= 0.0 {
            return Err(Error::Resource(format!(
                "WAN limiter requires bandwidth_mbps > 0, got {}",
                bandwidth_mbps
            )));
        }
        Ok(WanLimiter {
            bandwidth_bps: bandwidth_mbps * 1_000_000.0,
            next_free_at_ns: AtomicU64::new(0),
            start: Instant::now(),
        })
    }

    /// Blocks the caller for `8*bytes/bandwidth_bps + 20ms`, serialized
    /// against every other emission through the shared atomic timestamp.
    pub fn throttle(&self, bytes: usize) {
        let delay_ns = ((8.0 * bytes as f64 / self.bandwidth_bps) * 1e9) as u64 + WAN_CONSTANT_DELAY_NS;
        loop {
            let now_ns = self.start.elapsed().as_nanos() as u64;
            let current = self.next_free_at_ns.load(Ordering::SeqCst);
            let start_at = now_ns.max(current);
            let new_free_at = start_at + delay_ns;
            if self
                .next_free_at_ns
                .compare_exchange(current, new_free_at, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                let wait_ns = start_at.saturating_sub(now_ns);
                if wait_ns > 0 {
                    thread::sleep(Duration::from_nanos(wait_ns));
                }
                return;
            }
        }
    }
}

/// Byte-accounting shim shared by every `SystemCtx`/`EccSystemCtx`.
///
/// Lock-free in non-WAN mode: emissions are pure counter increments.
pub struct Bandwidth {
    com: AtomicU64,
    offline_com: AtomicU64,
    limiter: Option<WanLimiter>,
}

impl Bandwidth {
    pub fn new() -> Self {
        Bandwidth {
            com: AtomicU64::new(0),
            offline_com: AtomicU64::new(0),
            limiter: None,
        }
    }

    pub fn with_wan(bandwidth_mbps: f64) -> Result<Self> {
        Ok(Bandwidth {
            com: AtomicU64::new(0),
            offline_com: AtomicU64::new(0),
            limiter: Some(WanLimiter::new(bandwidth_mbps)?),
        })
    }

    pub fn com(&self) -> u64 {
        self.com.load(Ordering::SeqCst)
    }

    pub fn offline_com(&self) -> u64 {
        self.offline_com.load(Ordering::SeqCst)
    }

    fn record(&self, counter: &AtomicU64, party_count: usize, class: Emission, bytes: usize) {
        let scaled = bytes * class.multiplier(party_count);
        counter.fetch_add(scaled as u64, Ordering::SeqCst);
        if let Some(limiter) = &self.limiter {
            limiter.throttle(bytes);
        }
    }

    pub fn send(&self, party_count: usize, bytes: usize) {
        self.record(&self.com, party_count, Emission::Send, bytes);
    }

    pub fn broadcast(&self, party_count: usize, bytes: usize) {
        self.record(&self.com, party_count, Emission::Broadcast, bytes);
    }

    pub fn broadcast_n(&self, party_count: usize, bytes: usize) {
        self.record(&self.com, party_count, Emission::BroadcastN, bytes);
    }

    pub fn offline_send(&self, party_count: usize, bytes: usize) {
        self.record(&self.offline_com, party_count, Emission::Send, bytes);
    }

    pub fn offline_broadcast(&self, party_count: usize, bytes: usize) {
        self.record(&self.offline_com, party_count, Emission::Broadcast, bytes);
    }

    pub fn offline_broadcast_n(&self, party_count: usize, bytes: usize) {
        self.record(&self.offline_com, party_count, Emission::BroadcastN, bytes);
    }
}

impl Default for Bandwidth {
    fn default() -> Self {
        Bandwidth::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_scale_by_emission_class() {
        let bw = Bandwidth::new();
        bw.send(4, 10);
        bw.broadcast(4, 10);
        bw.broadcast_n(4, 10);
        assert_eq!(bw.com(), 10 + 30 + 40);
        assert_eq!(bw.offline_com(), 0);
    }

    #[test]
    fn offline_counter_is_independent() {
        let bw = Bandwidth::new();
        bw.offline_broadcast(3, 5);
        assert_eq!(bw.offline_com(), 10);
        assert_eq!(bw.com(), 0);
    }

    #[test]
    fn zero_bandwidth_is_rejected() {
        assert!(WanLimiter::new(0.0).is_err());
        assert!(WanLimiter::new(-1.0).is_err());
    }

    #[test]
    fn positive_bandwidth_constructs() {
        assert!(Bandwidth::with_wan(10.0).is_ok());
    }
}
