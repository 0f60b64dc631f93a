//! Benchmark code generation, encoding and reverse encoding
//! `cargo bench --bench encode`

#[macro_use]
extern crate criterion;

use ark_bn254::Fr;
use ark_std::{
    rand::{rngs::StdRng, SeedableRng},
    UniformRand,
};
use brakedown::{CodeSpec, LinearCode};

use criterion::Criterion;

/// a CryptoRng
pub fn test_rng() -> StdRng {
    // arbitrary seed
    let seed = [
        1, 0, 0, 0, 23, 0, 0, 0, 200, 1, 0, 0, 210, 30, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0,
    ];
    StdRng::from_seed(seed)
}

fn linear_code(c: &mut Criterion) {
    let rng = &mut test_rng();
    let spec = CodeSpec::default();

    for log_n in [12, 14, 16] {
        let n = 1usize << log_n;
        let mut group = c.benchmark_group(format!("brakedown::n=2^{}", log_n));
        group.sample_size(10);

        group.bench_function("generate", |b| {
            b.iter(|| LinearCode::<Fr>::generate(spec, n, rng).unwrap())
        });

        let code = LinearCode::<Fr>::generate(spec, n, rng).unwrap();
        let msg: Vec<Fr> = (0..n).map(|_| Fr::rand(rng)).collect();
        let word: Vec<Fr> = (0..code.codeword_len()).map(|_| Fr::rand(rng)).collect();

        group.bench_function("encode", |b| b.iter(|| code.encode(&msg).unwrap()));
        group.bench_function("reverse_encode", |b| {
            b.iter(|| code.reverse_encode(&word).unwrap())
        });

        group.finish();
    }
}

criterion_group!(benches, linear_code);

criterion_main!(benches);
