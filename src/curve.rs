// [src/curve.rs]
/*!
 * =================================================================
 * APARATO: CURVE PARAMETER REGISTRY (CORE MATH L1)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: DESCRIPTORES DE CURVA Y SU REGISTRO GLOBAL
 *
 * # Mathematical Proof
 * Un descriptor de curva fija el cuerpo `Fp`, la forma algebraica
 * (Weierstrass corta o Montgomery) y sus coeficientes, y verifica en
 * construcción la condición de discriminante que garantiza una curva
 * no singular. El registro expone los descriptores conocidos
 * (`secp256k1`, `Curve25519`) por `CurveId` en tiempo O(1),
 * independientemente de cuántas curvas adicionales se registren.
 * =================================================================
 */

use crate::bigint::BigInt;
use crate::errors::MathError;
use crate::field::{Field, FieldElement};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Forma algebraica de una curva soportada por este motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveForm {
    /// `y^2 = x^3 + a*x + b`.
    ShortWeierstrass,
    /// `B*y^2 = x^3 + A*x^2 + x`.
    Montgomery,
}

/// Identificador de una curva conocida por el registro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveId {
    /// La curva de Bitcoin/Ethereum, en forma de Weierstrass corta.
    Secp256k1,
    /// Curve25519, en forma de Montgomery.
    Curve25519,
}

/// Descriptor inmutable de los parámetros de una curva.
#[derive(Debug, Clone)]
pub struct CurveDescriptor {
    /// Identificador simbólico de la curva.
    pub id: CurveId,
    /// Forma algebraica de la curva.
    pub form: CurveForm,
    /// El cuerpo primo subyacente Fp.
    pub field: Field,
    /// Coeficiente `a` (Weierstrass) o `A` (Montgomery).
    pub a: FieldElement,
    /// Coeficiente `b` (Weierstrass) o `B` (Montgomery, normalmente 1).
    pub b: FieldElement,
    /// Punto generador, en coordenadas afines (x, y) para Weierstrass
    /// o solo `x` para Montgomery (la `y` de Montgomery no se usa por
    /// el motor de escalera diferencial).
    pub generator_x: FieldElement,
    /// Coordenada `y` del generador (solo relevante en Weierstrass).
    pub generator_y: FieldElement,
    /// Orden del subgrupo generado por el punto base.
    pub order: BigInt,
    /// Cofactor del grupo de la curva sobre el cuerpo `Fp`.
    pub cofactor: BigInt,
    /// Constante derivada de Montgomery `a24 = (A + 2) / 4 mod p`,
    /// precomputada en construcción para el paso de escalera
    /// diferencial. Solo poblada para `CurveForm::Montgomery`.
    pub montgomery_a24: Option<FieldElement>,
}

impl CurveDescriptor {
    /// Construye y valida un descriptor de curva de Weierstrass corta.
    ///
    /// # Errors
    /// Retorna `CurveInvariantError` si el discriminante `4a^3 + 27b^2`
    /// es cero (la curva sería singular).
    #[allow(clippy::too_many_arguments)]
    pub fn new_short_weierstrass(
        id: CurveId,
        p: BigInt,
        a: BigInt,
        b: BigInt,
        generator_x: BigInt,
        generator_y: BigInt,
        order: BigInt,
        cofactor: BigInt,
    ) -> Result<Self, MathError> {
        let field = Field::new(p)?;
        let a_element = field.reduce(&a)?;
        let b_element = field.reduce(&b)?;

        let four = field.reduce(&BigInt::from_u64(4))?;
        let twenty_seven = field.reduce(&BigInt::from_u64(27))?;
        let a_cubed = a_element.square().mul(&a_element)?;
        let b_squared = b_element.square();
        let discriminant = four.mul(&a_cubed)?.add(&twenty_seven.mul(&b_squared)?)?;
        if discriminant.is_zero() {
            return Err(MathError::CurveInvariantError("SINGULAR_CURVE_DISCRIMINANT_IS_ZERO".into()));
        }

        Ok(Self {
            id,
            form: CurveForm::ShortWeierstrass,
            generator_x: field.reduce(&generator_x)?,
            generator_y: field.reduce(&generator_y)?,
            a: a_element,
            b: b_element,
            field,
            order,
            cofactor,
            montgomery_a24: None,
        })
    }

    /// Construye y valida un descriptor de curva de Montgomery.
    ///
    /// # Errors
    /// Retorna `CurveInvariantError` if `B*(A^2 - 4) == 0` (la curva
    /// sería singular), or if `4` no es invertible in the field.
    pub fn new_montgomery(
        id: CurveId,
        p: BigInt,
        coefficient_a: BigInt,
        coefficient_b: BigInt,
        generator_x: BigInt,
        order: BigInt,
        cofactor: BigInt,
    ) -> Result<Self, MathError> {
        let field = Field::new(p)?;
        let a_element = field.reduce(&coefficient_a)?;
        let b_element = field.reduce(&coefficient_b)?;

        let four = field.reduce(&BigInt::from_u64(4))?;
        let a_squared_minus_four = a_element.square().sub(&four)?;
        let discriminant = b_element.mul(&a_squared_minus_four)?;
        if discriminant.is_zero() {
            return Err(MathError::CurveInvariantError("SINGULAR_CURVE_DISCRIMINANT_IS_ZERO".into()));
        }

        let a_plus_two = a_element.add(&field.reduce(&BigInt::from_u64(2))?)?;
        let a24 = a_plus_two.div(&four)?;

        Ok(Self {
            id,
            form: CurveForm::Montgomery,
            generator_y: field.reduce(&BigInt::zero())?,
            generator_x: field.reduce(&generator_x)?,
            a: a_element,
            b: b_element,
            field,
            order,
            cofactor,
            montgomery_a24: Some(a24),
        })
    }
}

static SECP256K1_DESCRIPTOR: Lazy<Arc<CurveDescriptor>> = Lazy::new(|| {
    Arc::new(
        CurveDescriptor::new_short_weierstrass(
            CurveId::Secp256k1,
            BigInt::from_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F").unwrap(),
            BigInt::zero(),
            BigInt::from_u64(7),
            BigInt::from_hex("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798").unwrap(),
            BigInt::from_hex("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8").unwrap(),
            BigInt::from_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141").unwrap(),
            BigInt::one(),
        )
        .expect("secp256k1 parameters describe a nonsingular curve"),
    )
});

static CURVE25519_DESCRIPTOR: Lazy<Arc<CurveDescriptor>> = Lazy::new(|| {
    Arc::new(
        CurveDescriptor::new_montgomery(
            CurveId::Curve25519,
            BigInt::from_hex("7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFED").unwrap(),
            BigInt::from_u64(486_662),
            BigInt::one(),
            BigInt::from_u64(9),
            BigInt::from_hex("1000000000000000000000000000000014DEF9DEA2F79CD65812631A5CF5D3ED").unwrap(),
            BigInt::from_u64(8),
        )
        .expect("Curve25519 parameters describe a nonsingular curve"),
    )
});

/// Retorna el descriptor registrado para un `CurveId`, en tiempo O(1).
#[must_use]
pub fn curve_by_id(id: CurveId) -> Arc<CurveDescriptor> {
    match id {
        CurveId::Secp256k1 => SECP256K1_DESCRIPTOR.clone(),
        CurveId::Curve25519 => CURVE25519_DESCRIPTOR.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secp256k1_descriptor_is_registered() {
        let descriptor = curve_by_id(CurveId::Secp256k1);
        assert_eq!(descriptor.form, CurveForm::ShortWeierstrass);
        assert_eq!(descriptor.cofactor, BigInt::one());
    }

    #[test]
    fn curve25519_a24_matches_rfc7748_derivation() {
        let descriptor = curve_by_id(CurveId::Curve25519);
        assert_eq!(descriptor.montgomery_a24.as_ref().unwrap().value(), &BigInt::from_u64(121_666));
    }

    #[test]
    fn singular_short_weierstrass_curve_is_rejected() {
        let result = CurveDescriptor::new_short_weierstrass(
            CurveId::Secp256k1,
            BigInt::from_u64(23),
            BigInt::zero(),
            BigInt::zero(),
            BigInt::from_u64(1),
            BigInt::from_u64(1),
            BigInt::from_u64(23),
            BigInt::one(),
        );
        assert!(result.is_err());
    }
}
