// [src/public_key.rs]
/*!
 * =================================================================
 * APARATO: PUBLIC KEY MANAGER (CORE MATH L1)
 * RESPONSABILIDAD: DERIVACIÓN Y SERIALIZACIÓN SEC1 DE CLAVES PÚBLICAS
 *
 * # Mathematical Proof
 * La clave pública se deriva multiplicando el punto generador de la
 * curva por el escalar privado. Para curvas de Weierstrass corta el
 * resultado es un punto afín `(x, y)` y se serializa en formato SEC1
 * (comprimido `0x02/0x03 || x` o no comprimido `0x04 || x || y`). Para
 * curvas de Montgomery la escalera diferencial solo produce la
 * coordenada `x`; la serialización es simplemente esa coordenada.
 * =================================================================
 */

use crate::curve::{CurveDescriptor, CurveForm};
use crate::errors::MathError;
use crate::field::FieldElement;
use crate::point::AffinePoint;
use crate::private_key::PrivateKey;
use crate::{montgomery, weierstrass};
use std::sync::Arc;
use tracing::instrument;

/// La representación geométrica concreta de una clave pública,
/// dependiente de la forma de la curva de origen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKeyPoint {
    /// Punto afín completo `(x, y)` para curvas de Weierstrass corta.
    Weierstrass(AffinePoint),
    /// Solo la coordenada x para curvas de Montgomery.
    Montgomery(FieldElement),
}

/// Clave pública de curva elíptica.
#[derive(Debug, Clone)]
pub struct PublicKey {
    curve: Arc<CurveDescriptor>,
    point: PublicKeyPoint,
}

impl PublicKey {
    /// Deriva la clave pública correspondiente a una clave privada
    /// multiplicando el generador de su curva por el escalar secreto.
    #[instrument(level = "trace", skip(private_key))]
    pub fn derive(private_key: &PrivateKey) -> Result<Self, MathError> {
        let curve = private_key.curve().clone();
        let point = match curve.form {
            CurveForm::ShortWeierstrass => {
                let generator = AffinePoint::new(curve.generator_x.clone(), curve.generator_y.clone());
                let derived = weierstrass::scalar_multiply(&generator, private_key.scalar(), &curve)?;
                PublicKeyPoint::Weierstrass(derived)
            }
            CurveForm::Montgomery => {
                let mut rng = crate::rng::OsSecureRng;
                let derived = montgomery::ladder_multiply(private_key.scalar(), &curve.generator_x, &curve, &mut rng)?;
                PublicKeyPoint::Montgomery(derived.x.div(&derived.z)?)
            }
        };
        Ok(Self { curve, point })
    }

    /// La curva a la que pertenece esta clave.
    #[must_use]
    pub fn curve(&self) -> &Arc<CurveDescriptor> {
        &self.curve
    }

    /// La representación geométrica de esta clave.
    #[must_use]
    pub fn point(&self) -> &PublicKeyPoint {
        &self.point
    }

    fn coordinate_width(&self) -> usize {
        self.curve.field.modulus.to_bytes_be().len()
    }

    /// Serialización SEC1 comprimida (`0x02/0x03 || x`) para curvas de
    /// Weierstrass, o la coordenada x cruda para curvas de Montgomery.
    ///
    /// # Errors
    /// Retorna `CurveInvariantError` si la clave es el punto en el
    /// infinito (nunca debería ocurrir para una clave derivada de un
    /// escalar válido, pero se verifica de todas formas).
    pub fn compressed(&self) -> Result<Vec<u8>, MathError> {
        let width = self.coordinate_width();
        match &self.point {
            PublicKeyPoint::Weierstrass(AffinePoint::Infinity) => {
                Err(MathError::CurveInvariantError("PUBLIC_KEY_CANNOT_BE_THE_POINT_AT_INFINITY".into()))
            }
            PublicKeyPoint::Weierstrass(AffinePoint::Point { x, y }) => {
                let prefix = if y.is_odd() { 0x03 } else { 0x02 };
                let mut out = Vec::with_capacity(1 + width);
                out.push(prefix);
                out.extend(x.value().to_bytes_be_padded(width)?);
                Ok(out)
            }
            PublicKeyPoint::Montgomery(x) => x.value().to_bytes_be_padded(width),
        }
    }

    /// Serialización SEC1 no comprimida (`0x04 || x || y`) para curvas
    /// de Weierstrass. Para curvas de Montgomery, equivalente a
    /// `compressed` ya que la escalera nunca produce una coordenada y.
    pub fn uncompressed(&self) -> Result<Vec<u8>, MathError> {
        let width = self.coordinate_width();
        match &self.point {
            PublicKeyPoint::Weierstrass(AffinePoint::Infinity) => {
                Err(MathError::CurveInvariantError("PUBLIC_KEY_CANNOT_BE_THE_POINT_AT_INFINITY".into()))
            }
            PublicKeyPoint::Weierstrass(AffinePoint::Point { x, y }) => {
                let mut out = Vec::with_capacity(1 + 2 * width);
                out.push(0x04);
                out.extend(x.value().to_bytes_be_padded(width)?);
                out.extend(y.value().to_bytes_be_padded(width)?);
                Ok(out)
            }
            PublicKeyPoint::Montgomery(x) => x.value().to_bytes_be_padded(width),
        }
    }

    /// Recupera una coordenada y válida para una clave de Montgomery,
    /// resolviendo `y^2 = x^3 + A*x^2 + x` (con `B = 1`) y eligiendo,
    /// entre las dos raíces `y`/`p - y`, la de menor valor entero.
    ///
    /// # Errors
    /// Retorna `CurveInvariantError` si la clave no pertenece a una
    /// curva de Montgomery, o `ArithmeticError` si `x` no corresponde a
    /// ningún punto de la curva.
    pub fn montgomery_y(&self) -> Result<FieldElement, MathError> {
        let PublicKeyPoint::Montgomery(x) = &self.point else {
            return Err(MathError::CurveInvariantError("MONTGOMERY_Y_REQUIRES_A_MONTGOMERY_CURVE".into()));
        };
        let x_squared = x.square();
        let x_cubed = x_squared.mul(x)?;
        let a_term = self.curve.a.mul(&x_squared)?;
        let right_hand_side = x_cubed.add(&a_term)?.add(x)?;
        let candidate = right_hand_side.sqrt()?;
        let mirror = candidate.negate();
        Ok(if candidate.value() <= mirror.value() { candidate } else { mirror })
    }
}
