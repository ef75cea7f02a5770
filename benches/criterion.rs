use criterion::{black_box, criterion_group, criterion_main, Criterion, SamplingMode};

use curv::elliptic::curves::bls12_381::g1::FE as FE1;
use curv::elliptic::curves::traits::ECScalar;
use curv::BigInt;

use spdz_sigver::basic_bls::{BLSSignature, KeyPairG2};
use spdz_sigver::context::{Mode, SystemCtx};
use spdz_sigver::{fp, secver};

pub fn share_open(c: &mut Criterion) {
    let mut g = c.benchmark_group("share-open");
    g.sampling_mode(SamplingMode::Linear);
    g.sample_size(45);

    for n in [2usize, 5, 10] {
        let ctx = SystemCtx::new(n, Mode::Malicious).unwrap();
        let v: FE1 = ECScalar::from(&BigInt::from(42));

        g.bench_function(format!("share_a n={}", n), |b| {
            b.iter(|| black_box(fp::share_a(&ctx, &v)))
        });

        let shares = fp::share_a(&ctx, &v);
        g.bench_function(format!("open n={}", n), |b| {
            b.iter(|| black_box(fp::open(&ctx, &shares).unwrap()))
        });
    }
}

pub fn sec_mul(c: &mut Criterion) {
    let mut g = c.benchmark_group("sec-mul");
    g.sampling_mode(SamplingMode::Linear);
    g.sample_size(45);

    for n in [2usize, 5, 10] {
        let ctx = SystemCtx::new(n, Mode::Malicious).unwrap();
        let x: FE1 = ECScalar::from(&BigInt::from(6));
        let y: FE1 = ECScalar::from(&BigInt::from(7));
        let xs = fp::share_a(&ctx, &x);
        let ys = fp::share_a(&ctx, &y);

        g.bench_function(format!("sec_mul n={}", n), |b| {
            b.iter(|| black_box(fp::sec_mul(&ctx, &xs, &ys)))
        });
    }
}

pub fn sec_ver_bls(c: &mut Criterion) {
    let mut g = c.benchmark_group("sec-ver-bls");
    g.sampling_mode(SamplingMode::Linear);
    g.sample_size(25);

    for n in [2usize, 5] {
        let ctx = SystemCtx::new(n, Mode::Malicious).unwrap();
        let keys = KeyPairG2::new();
        let msg = b"Hello benchmark World";
        let sig = BLSSignature::sign(msg, &keys);
        let pk = keys.public_key();

        g.bench_function(format!("sec_ver n={}", n), |b| {
            b.iter(|| black_box(secver::bls::sec_ver(&ctx, &sig, msg, &pk).unwrap()))
        });
    }
}

criterion_group!(benches, share_open, sec_mul, sec_ver_bls);
criterion_main!(benches);
