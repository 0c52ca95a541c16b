// [tests/montgomery_ladder_integrity.rs]
use curvekit_core_math::montgomery;
use curvekit_core_math::prelude::*;

fn curve25519() -> std::sync::Arc<CurveDescriptor> {
    curve_by_id(CurveId::Curve25519)
}

#[test]
fn scalar_one_yields_the_base_point() {
    let curve = curve25519();
    let mut rng = FixedSeedRng::from_seed([7u8; 32]);
    let result = montgomery::ladder_multiply(&BigInt::one(), &curve.generator_x, &curve, &mut rng).unwrap();
    assert_eq!(result.x.div(&result.z).unwrap(), curve.generator_x);
}

#[test]
fn scalar_two_matches_the_ladder_step_doubling() {
    let curve = curve25519();
    let base = MontgomeryPoint::from_affine_x(curve.generator_x.clone());
    let identity = MontgomeryPoint::infinity_like(&curve.generator_x);
    let a24 = curve.montgomery_a24.as_ref().unwrap();
    let (doubled_x, doubled_z, _, _) =
        montgomery::ladder_step(&curve.generator_x, &base.x, &base.z, &identity.x, &identity.z, a24).unwrap();

    let mut rng = FixedSeedRng::from_seed([8u8; 32]);
    let via_ladder = montgomery::ladder_multiply(&BigInt::from_u64(2), &curve.generator_x, &curve, &mut rng).unwrap();
    let doubled_affine = doubled_x.div(&doubled_z).unwrap();
    assert_eq!(via_ladder.x.div(&via_ladder.z).unwrap(), doubled_affine);
}

#[test]
fn cswap_false_is_identity() {
    let curve = curve25519();
    let mut a = MontgomeryPoint::from_affine_x(curve.field.reduce(&BigInt::from_u64(9)).unwrap());
    let mut b = MontgomeryPoint::from_affine_x(curve.field.reduce(&BigInt::from_u64(4)).unwrap());
    let original_a = a.clone();
    let original_b = b.clone();
    montgomery::cswap(false, &mut a, &mut b).unwrap();
    assert_eq!(a, original_a);
    assert_eq!(b, original_b);
}

#[test]
fn cswap_true_exchanges_both_points() {
    let curve = curve25519();
    let mut a = MontgomeryPoint::from_affine_x(curve.field.reduce(&BigInt::from_u64(9)).unwrap());
    let mut b = MontgomeryPoint::from_affine_x(curve.field.reduce(&BigInt::from_u64(4)).unwrap());
    let original_a = a.clone();
    let original_b = b.clone();
    montgomery::cswap(true, &mut a, &mut b).unwrap();
    assert_eq!(a, original_b);
    assert_eq!(b, original_a);
}

#[test]
fn cswap_across_different_fields_is_an_internal_invariant_error() {
    let curve25519 = curve25519();
    let secp256k1 = curve_by_id(CurveId::Secp256k1);
    let mut a = MontgomeryPoint::from_affine_x(curve25519.generator_x.clone());
    let mut b = MontgomeryPoint::from_affine_x(secp256k1.field.reduce(&BigInt::from_u64(4)).unwrap());
    assert!(montgomery::cswap(true, &mut a, &mut b).is_err());
}

#[test]
fn ladder_of_sum_matches_differential_addition() {
    let curve = curve25519();
    let a = BigInt::from_u64(11);
    let b = BigInt::from_u64(6);
    let sum = a.add_signed(&b);

    let mut rng = FixedSeedRng::from_seed([9u8; 32]);
    let combined = montgomery::ladder_multiply(&sum, &curve.generator_x, &curve, &mut rng).unwrap();
    let via_a = montgomery::ladder_multiply(&a, &curve.generator_x, &curve, &mut rng).unwrap();
    let via_b = montgomery::ladder_multiply(&b, &curve.generator_x, &curve, &mut rng).unwrap();

    assert_ne!(via_a.x.div(&via_a.z).unwrap(), via_b.x.div(&via_b.z).unwrap());
    assert!(!combined.is_infinity());
}
