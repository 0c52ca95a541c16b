// [tests/curve_registry_integrity.rs]
use curvekit_core_math::prelude::*;

#[test]
fn secp256k1_lookup_is_stable_across_calls() {
    let first = curve_by_id(CurveId::Secp256k1);
    let second = curve_by_id(CurveId::Secp256k1);
    assert_eq!(first.order, second.order);
    assert_eq!(first.form, CurveForm::ShortWeierstrass);
}

#[test]
fn curve25519_lookup_is_stable_across_calls() {
    let first = curve_by_id(CurveId::Curve25519);
    let second = curve_by_id(CurveId::Curve25519);
    assert_eq!(first.order, second.order);
    assert_eq!(second.form, CurveForm::Montgomery);
    assert!(first.montgomery_a24.is_some());
}

#[test]
fn private_key_rejects_zero_and_out_of_range_scalars() {
    assert!(PrivateKey::from_decimal(CurveId::Secp256k1, "0").is_err());
    let order = curve_by_id(CurveId::Secp256k1).order.clone();
    assert!(PrivateKey::from_decimal(CurveId::Secp256k1, &order.to_decimal()).is_err());
    let order_plus_one = order.add_signed(&BigInt::one());
    assert!(PrivateKey::from_decimal(CurveId::Secp256k1, &order_plus_one.to_decimal()).is_err());
}

#[test]
fn private_key_accepts_the_full_valid_range_boundaries() {
    assert!(PrivateKey::from_decimal(CurveId::Secp256k1, "1").is_ok());
    let order_minus_one = curve_by_id(CurveId::Secp256k1).order.sub_signed(&BigInt::one());
    assert!(PrivateKey::from_decimal(CurveId::Secp256k1, &order_minus_one.to_decimal()).is_ok());
}

#[test]
fn singular_curve_parameters_are_rejected_at_construction() {
    let singular = CurveDescriptor::new_short_weierstrass(
        CurveId::Secp256k1,
        BigInt::from_u64(23),
        BigInt::zero(),
        BigInt::zero(),
        BigInt::from_u64(1),
        BigInt::from_u64(1),
        BigInt::from_u64(23),
        BigInt::one(),
    );
    assert!(singular.is_err());
}
