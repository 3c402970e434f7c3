use std::{sync::Arc, time::Duration};

use ark_bn254::Fr;
use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;
use rust_da_kzg_primitives::{
    helpers::{pad_payload, to_fr_array},
    testing::srs_from_secret,
};
use rust_da_kzg_prover::kzg::KZG;

fn bench_kzg_commit(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let srs = srs_from_secret(Fr::from(0x1234_5678u64), 4096, 4096, 4096);
    let kzg = KZG::new(Arc::new(srs));

    for size in [10_000usize, 30_000, 100_000] {
        let random_blob: Vec<u8> = (0..size).map(|_| rng.gen_range(32..=126) as u8).collect();
        let coeffs = to_fr_array(&pad_payload(&random_blob)).unwrap();
        c.bench_function(&format!("bench_kzg_commit_{}", size), |b| {
            b.iter(|| kzg.commit(&coeffs).unwrap())
        });
        c.bench_function(&format!("bench_kzg_length_proof_{}", size), |b| {
            b.iter(|| kzg.length_proof(&coeffs, 4096).unwrap())
        });
    }
}

fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_secs(5)) // Warm-up time
        .measurement_time(Duration::from_secs(10)) // Measurement time
        .sample_size(10) // Number of samples to take
}

criterion_group!(
    name = benches;
    config = criterion_config();
    targets = bench_kzg_commit
);
criterion_main!(benches);
