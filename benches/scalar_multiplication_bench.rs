// [benches/scalar_multiplication_bench.rs]
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curvekit_core_math::montgomery;
use curvekit_core_math::prelude::*;
use curvekit_core_math::weierstrass;

fn weierstrass_scalar_multiplication(c: &mut Criterion) {
    let curve = curve_by_id(CurveId::Secp256k1);
    let generator = AffinePoint::new(curve.generator_x.clone(), curve.generator_y.clone());
    let scalar = BigInt::from_hex("29EE955FEDA1A85F87ED4004958479706BA6C71FC99A67697A9A13D9D08C618E").unwrap();

    c.bench_function("secp256k1_scalar_multiply", |b| {
        b.iter(|| weierstrass::scalar_multiply(black_box(&generator), black_box(&scalar), black_box(&curve)).unwrap())
    });
}

fn montgomery_ladder_multiplication(c: &mut Criterion) {
    let curve = curve_by_id(CurveId::Curve25519);
    let scalar = BigInt::from_hex("29EE955FEDA1A85F87ED4004958479706BA6C71FC99A67697A9A13D9D08C618E").unwrap();

    c.bench_function("curve25519_ladder_multiply", |b| {
        let mut rng = OsSecureRng;
        b.iter(|| montgomery::ladder_multiply(black_box(&scalar), black_box(&curve.generator_x), black_box(&curve), black_box(&mut rng)).unwrap())
    });
}

criterion_group!(benches, weierstrass_scalar_multiplication, montgomery_ladder_multiplication);
criterion_main!(benches);
