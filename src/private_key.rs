// [src/private_key.rs]
/*!
 * =================================================================
 * APARATO: PRIVATE KEY MANAGER (CORE MATH L1)
 * RESPONSABILIDAD: GESTIÓN SEGURA DE ESCALARES SECRETOS
 *
 * # Mathematical Proof
 * Una clave privada es un escalar `k` tal que `1 <= k < n`, donde `n`
 * es el orden del subgrupo generado por el punto base de la curva.
 * El escalar se borra de memoria al soltar el valor (`Drop`), y nunca
 * se envuelve una biblioteca de curva externa: este motor mismo es la
 * implementación de la aritmética de curva.
 * =================================================================
 */

use crate::bigint::BigInt;
use crate::curve::{curve_by_id, CurveDescriptor, CurveId};
use crate::errors::MathError;
use std::sync::Arc;
use zeroize::Zeroize;

/// Clave privada de curva elíptica: un escalar `k` junto con la curva
/// a la que pertenece. Garantiza `1 <= k < n`.
#[derive(Debug, Clone)]
pub struct PrivateKey {
    curve: Arc<CurveDescriptor>,
    scalar: BigInt,
}

impl PrivateKey {
    fn validate_and_build(curve_id: CurveId, scalar: BigInt) -> Result<Self, MathError> {
        let curve = curve_by_id(curve_id);
        if scalar.is_zero() || scalar.is_negative() || scalar >= curve.order {
            return Err(MathError::ScalarOutOfRange("PRIVATE_SCALAR_MUST_SATISFY_1_LE_K_LT_N".into()));
        }
        Ok(Self { curve, scalar })
    }

    /// Construye una clave privada a partir de bytes Big-Endian.
    pub fn from_bytes(curve_id: CurveId, bytes: &[u8]) -> Result<Self, MathError> {
        Self::validate_and_build(curve_id, BigInt::from_bytes_be(bytes))
    }

    /// Construye una clave privada a partir de una cadena hexadecimal.
    pub fn from_hex(curve_id: CurveId, hex_input: &str) -> Result<Self, MathError> {
        Self::validate_and_build(curve_id, BigInt::from_hex(hex_input)?)
    }

    /// Construye una clave privada a partir de una cadena decimal.
    pub fn from_decimal(curve_id: CurveId, decimal_input: &str) -> Result<Self, MathError> {
        Self::validate_and_build(curve_id, BigInt::from_decimal(decimal_input)?)
    }

    /// Construye una clave privada a partir de Base64 estándar.
    pub fn from_base64(curve_id: CurveId, base64_input: &str) -> Result<Self, MathError> {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;
        let bytes = STANDARD.decode(base64_input).map_err(|error| MathError::ParseError(error.to_string()))?;
        Self::validate_and_build(curve_id, BigInt::from_bytes_be(&bytes))
    }

    /// La curva a la que pertenece esta clave.
    #[must_use]
    pub fn curve(&self) -> &Arc<CurveDescriptor> {
        &self.curve
    }

    /// El escalar secreto subyacente.
    #[must_use]
    pub fn scalar(&self) -> &BigInt {
        &self.scalar
    }

    /// Serializa el escalar a bytes Big-Endian del ancho natural del
    /// orden de la curva.
    pub fn to_bytes(&self) -> Result<Vec<u8>, MathError> {
        self.scalar.to_bytes_be_padded(self.curve.order.to_bytes_be().len())
    }

    /// Serializa el escalar a una cadena hexadecimal (minúsculas), del
    /// ancho natural del orden de la curva.
    pub fn to_hex(&self) -> Result<String, MathError> {
        Ok(hex::encode(self.to_bytes()?))
    }

    /// Serializa el escalar a Base64 estándar, para intercambio con
    /// colaboradores externos.
    pub fn to_base64(&self) -> Result<String, MathError> {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;
        Ok(STANDARD.encode(self.to_bytes()?))
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.scalar.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_scalar_is_rejected() {
        assert!(PrivateKey::from_decimal(CurveId::Secp256k1, "0").is_err());
    }

    #[test]
    fn scalar_equal_to_order_is_rejected() {
        let order = curve_by_id(CurveId::Secp256k1).order.clone();
        assert!(PrivateKey::from_decimal(CurveId::Secp256k1, &order.to_decimal()).is_err());
    }

    #[test]
    fn valid_scalar_round_trips_through_bytes() {
        let key = PrivateKey::from_hex(
            CurveId::Secp256k1,
            "0000000000000000000000000000000000000000000000000000000000002A",
        )
        .unwrap();
        assert_eq!(key.scalar(), &BigInt::from_u64(42));
        assert_eq!(key.to_bytes().unwrap().len(), 32);
    }

    #[test]
    fn to_hex_round_trips_through_from_hex() {
        let key = PrivateKey::from_decimal(CurveId::Secp256k1, "42").unwrap();
        let hex_export = key.to_hex().unwrap();
        let reparsed = PrivateKey::from_hex(CurveId::Secp256k1, &hex_export).unwrap();
        assert_eq!(key.scalar(), reparsed.scalar());
    }

    #[test]
    fn to_base64_round_trips_through_from_base64() {
        let key = PrivateKey::from_decimal(CurveId::Curve25519, "9").unwrap();
        let base64_export = key.to_base64().unwrap();
        let reparsed = PrivateKey::from_base64(CurveId::Curve25519, &base64_export).unwrap();
        assert_eq!(key.scalar(), reparsed.scalar());
    }

    #[test]
    fn base64_parsing_matches_hex_parsing() {
        let from_hex = PrivateKey::from_hex(CurveId::Curve25519, "09").unwrap();
        let from_b64 = PrivateKey::from_base64(CurveId::Curve25519, "CQ==").unwrap();
        assert_eq!(from_hex.scalar(), from_b64.scalar());
    }
}
