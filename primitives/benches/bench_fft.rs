use ark_bn254::Fr;
use ark_ff::UniformRand;
use criterion::{criterion_group, criterion_main, Criterion};
use rust_da_kzg_primitives::{fft::FFTSettings, params::EncodingParams, rs::Encoder};
use std::time::Duration;

fn bench_fft(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let fs = FFTSettings::new(16).unwrap();

    for scale in [10u32, 14, 16] {
        let vals: Vec<Fr> = (0..1usize << scale).map(|_| Fr::rand(&mut rng)).collect();
        c.bench_function(&format!("bench_fft_fr_2^{}", scale), |b| {
            b.iter(|| fs.fft(&vals, false).unwrap())
        });
    }
}

fn bench_rs_encode(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let encoder = Encoder::new(EncodingParams::new(64, 256)).unwrap();
    let coeffs: Vec<Fr> = (0..4096).map(|_| Fr::rand(&mut rng)).collect();

    c.bench_function("bench_rs_encode_64x256", |b| {
        b.iter(|| encoder.encode(&coeffs).unwrap())
    });

    let (frames, _) = encoder.encode(&coeffs).unwrap();
    let indices: Vec<u64> = (0..frames.len() as u64).step_by(2).collect();
    let subset: Vec<_> = indices
        .iter()
        .map(|i| frames[*i as usize].clone())
        .collect();
    c.bench_function("bench_rs_decode_half_64x256", |b| {
        b.iter(|| encoder.decode_to_coeffs(&subset, &indices, 4096 * 32).unwrap())
    });
}

fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_secs(3))
        .measurement_time(Duration::from_secs(10))
        .sample_size(10)
}

criterion_group!(
    name = benches;
    config = criterion_config();
    targets = bench_fft, bench_rs_encode
);
criterion_main!(benches);
