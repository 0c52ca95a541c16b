// [src/field.rs]
/*!
 * =================================================================
 * APARATO: FINITE FIELD ARITHMETIC ENGINE (CORE MATH L1)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ARITMÉTICA MODULAR SOBRE UN PRIMO ARBITRARIO
 *
 * # Mathematical Proof (Generic Prime Field)
 * A diferencia de un motor fijo a un único primo secp256k1, este
 * cuerpo finito Fp se parametriza en tiempo de ejecución por `p`, de
 * modo que el mismo motor sirve tanto a la curva de Weierstrass corta
 * como a la curva de Montgomery registradas por el motor de curvas.
 * Cada `FieldElement` conserva su propio módulo para que las
 * operaciones mixtas entre cuerpos distintos fallen de forma
 * explícita en lugar de producir resultados silenciosamente
 * incorrectos.
 * =================================================================
 */

use crate::bigint::BigInt;
use crate::errors::MathError;
use tracing::{instrument, trace};

/// Cuerpo finito Fp, parametrizado por un primo `p` arbitrario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    /// El primo `p` que define este cuerpo.
    pub modulus: BigInt,
}

impl Field {
    /// Construye un cuerpo finito verificando que el módulo sea mayor
    /// que uno. Este motor no verifica primalidad de `p`; eso es
    /// responsabilidad del registro de curvas al admitir un descriptor.
    pub fn new(modulus: BigInt) -> Result<Self, MathError> {
        if modulus.is_negative() || modulus <= BigInt::one() {
            return Err(MathError::CurveInvariantError("FIELD_MODULUS_MUST_EXCEED_ONE".into()));
        }
        Ok(Self { modulus })
    }

    /// Reduce un entero arbitrario al representante canónico en `[0, p)`.
    pub fn reduce(&self, value: &BigInt) -> Result<FieldElement, MathError> {
        Ok(FieldElement { value: value.modulo(&self.modulus)?, modulus: self.modulus.clone() })
    }

    /// El elemento neutro aditivo.
    #[must_use]
    pub fn zero(&self) -> FieldElement {
        FieldElement { value: BigInt::zero(), modulus: self.modulus.clone() }
    }

    /// El elemento neutro multiplicativo.
    #[must_use]
    pub fn one(&self) -> FieldElement {
        FieldElement { value: BigInt::one(), modulus: self.modulus.clone() }
    }
}

/// Elemento de un cuerpo finito Fp. Invariante: `0 <= value < modulus`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldElement {
    value: BigInt,
    modulus: BigInt,
}

impl FieldElement {
    /// Constructs an element directly from an already-reduced value
    /// and its modulus, bypassing `Field::reduce`. Reserved for
    /// internal callers (the ladder/cswap machinery) that manipulate
    /// raw bit patterns known to already lie in `[0, modulus)`.
    pub(crate) fn from_raw_parts(value: BigInt, modulus: BigInt) -> Self {
        Self { value, modulus }
    }

    #[must_use]
    pub fn value(&self) -> &BigInt {
        &self.value
    }

    #[must_use]
    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    #[must_use]
    pub fn is_odd(&self) -> bool {
        self.value.is_odd()
    }

    fn require_same_field(&self, other: &Self) -> Result<(), MathError> {
        if self.modulus != other.modulus {
            return Err(MathError::ArithmeticError("FIELD_ELEMENTS_BELONG_TO_DIFFERENT_FIELDS".into()));
        }
        Ok(())
    }

    /// Adición modular: `(self + other) mod p`.
    pub fn add(&self, other: &Self) -> Result<Self, MathError> {
        self.require_same_field(other)?;
        Ok(Self { value: self.value.add_signed(&other.value).modulo(&self.modulus)?, modulus: self.modulus.clone() })
    }

    /// Sustracción modular: `(self - other) mod p`.
    pub fn sub(&self, other: &Self) -> Result<Self, MathError> {
        self.require_same_field(other)?;
        Ok(Self { value: self.value.sub_signed(&other.value).modulo(&self.modulus)?, modulus: self.modulus.clone() })
    }

    /// Negación modular: `(-self) mod p`.
    #[must_use]
    pub fn negate(&self) -> Self {
        let negated = self.value.negate().modulo(&self.modulus).expect("modulus is positive by construction");
        Self { value: negated, modulus: self.modulus.clone() }
    }

    /// Multiplicación modular: `(self * other) mod p`.
    #[instrument(level = "trace", skip(self, other))]
    pub fn mul(&self, other: &Self) -> Result<Self, MathError> {
        self.require_same_field(other)?;
        Ok(Self { value: self.value.mul_signed(&other.value).modulo(&self.modulus)?, modulus: self.modulus.clone() })
    }

    /// Cuadrado modular: `(self^2) mod p`.
    #[must_use]
    pub fn square(&self) -> Self {
        Self {
            value: self.value.mul_signed(&self.value).modulo(&self.modulus).expect("modulus is positive by construction"),
            modulus: self.modulus.clone(),
        }
    }

    /// Exponenciación modular `self^exponent mod p`.
    pub fn pow(&self, exponent: &BigInt) -> Result<Self, MathError> {
        Ok(Self { value: BigInt::pow_mod(&self.value, exponent, &self.modulus)?, modulus: self.modulus.clone() })
    }

    /// Inversión modular vía el Pequeño Teorema de Fermat
    /// (`self^(p-2) mod p`, válido porque el registro de curvas solo
    /// admite módulos primos).
    #[instrument(level = "trace", skip(self))]
    pub fn invert(&self) -> Result<Self, MathError> {
        if self.is_zero() {
            return Err(MathError::ArithmeticError("INVERSE_OF_ZERO_IS_UNDEFINED".into()));
        }
        trace!("computing modular inverse via Fermat exponentiation");
        let exponent = self.modulus.sub_signed(&BigInt::from_u64(2));
        self.pow(&exponent)
    }

    /// División modular: `(self / other) mod p`.
    pub fn div(&self, other: &Self) -> Result<Self, MathError> {
        self.mul(&other.invert()?)
    }

    /// Símbolo de Legendre generalizado vía Euler: retorna `1` si
    /// `self` es residuo cuadrático no nulo, `p - 1` (es decir `-1`)
    /// si no lo es, y `0` si `self` es cero.
    pub fn legendre(&self) -> Result<BigInt, MathError> {
        if self.is_zero() {
            return Ok(BigInt::zero());
        }
        let exponent = self.modulus.sub_signed(&BigInt::one()).shift_right(1);
        BigInt::pow_mod(&self.value, &exponent, &self.modulus)
    }

    /// Verdadero si `self` es un residuo cuadrático distinto de cero.
    pub fn is_square(&self) -> Result<bool, MathError> {
        Ok(self.legendre()? == BigInt::one())
    }

    /// Raíz cuadrada modular. Usa el atajo `p ≡ 3 (mod 4)` cuando
    /// aplica (secp256k1 y Curve25519 ambas caen en este caso) y cae
    /// de vuelta al algoritmo general de Tonelli-Shanks en otro caso.
    ///
    /// # Errors
    /// Retorna `ArithmeticError` si `self` no es un residuo cuadrático.
    #[instrument(level = "trace", skip(self))]
    pub fn sqrt(&self) -> Result<Self, MathError> {
        if self.is_zero() {
            return Ok(self.clone());
        }
        let four = BigInt::from_u64(4);
        if self.modulus.modulo(&four)? == BigInt::from_u64(3) {
            let exponent = self.modulus.add_signed(&BigInt::one()).shift_right(2);
            let candidate = self.pow(&exponent)?;
            return candidate.confirm_square_root_of(self);
        }
        self.tonelli_shanks().and_then(|root| root.confirm_square_root_of(self))
    }

    fn confirm_square_root_of(self, original: &Self) -> Result<Self, MathError> {
        if self.square() == *original {
            Ok(self)
        } else {
            Err(MathError::ArithmeticError("VALUE_IS_NOT_A_QUADRATIC_RESIDUE".into()))
        }
    }

    /// Algoritmo general de Tonelli-Shanks, ejercitado por cuerpos cuyo
    /// primo no satisface `p ≡ 3 (mod 4)`.
    fn tonelli_shanks(&self) -> Result<Self, MathError> {
        let p = &self.modulus;
        let p_minus_one = p.sub_signed(&BigInt::one());
        let mut q = p_minus_one.clone();
        let mut s: usize = 0;
        while !q.is_odd() {
            q = q.shift_right(1);
            s += 1;
        }

        let mut candidate_non_residue = BigInt::from_u64(2);
        loop {
            let candidate = Field { modulus: p.clone() }.reduce(&candidate_non_residue)?;
            if candidate.legendre()? == p_minus_one {
                break;
            }
            candidate_non_residue = candidate_non_residue.add_signed(&BigInt::one());
        }

        let mut m = s;
        let mut c = BigInt::pow_mod(&candidate_non_residue, &q, p)?;
        let mut t = BigInt::pow_mod(&self.value, &q, p)?;
        let mut r = BigInt::pow_mod(&self.value, &q.add_signed(&BigInt::one()).shift_right(1), p)?;

        loop {
            if t == BigInt::one() {
                return Ok(Self { value: r, modulus: p.clone() });
            }
            let mut exponent_index = 0usize;
            let mut t_power = t.clone();
            while t_power != BigInt::one() {
                t_power = t_power.mul_signed(&t_power).modulo(p)?;
                exponent_index += 1;
                if exponent_index == m {
                    return Err(MathError::ArithmeticError("VALUE_IS_NOT_A_QUADRATIC_RESIDUE".into()));
                }
            }
            let exponent_for_b = BigInt::one().shift_left(m - exponent_index - 1);
            let b = BigInt::pow_mod(&c, &exponent_for_b, p)?;
            m = exponent_index;
            c = b.mul_signed(&b).modulo(p)?;
            t = t.mul_signed(&c).modulo(p)?;
            r = r.mul_signed(&b).modulo(p)?;
        }
    }

    /// Inversión por lote (truco de Montgomery): amortiza el costo de
    /// `invert` a una sola exponenciación para todo el lote.
    #[instrument(level = "debug", skip_all)]
    pub fn batch_invert(elements: &[FieldElement]) -> Result<Vec<FieldElement>, MathError> {
        if elements.is_empty() {
            return Ok(Vec::new());
        }
        let mut prefix_products = Vec::with_capacity(elements.len());
        let mut running_product = elements[0].modulus_one();
        for element in elements {
            if element.is_zero() {
                return Err(MathError::ArithmeticError("BATCH_INVERT_ENCOUNTERED_ZERO".into()));
            }
            running_product = running_product.mul(element)?;
            prefix_products.push(running_product.clone());
        }

        let mut results = vec![elements[0].modulus_one(); elements.len()];
        let mut inverse_accumulator = running_product.invert()?;
        for index in (1..elements.len()).rev() {
            results[index] = inverse_accumulator.mul(&prefix_products[index - 1])?;
            inverse_accumulator = inverse_accumulator.mul(&elements[index])?;
        }
        results[0] = inverse_accumulator;
        Ok(results)
    }

    fn modulus_one(&self) -> Self {
        Self { value: BigInt::one(), modulus: self.modulus.clone() }
    }

    /// Produces the multiplicative identity of the same field as
    /// `self`. Used by the point types to lift affine coordinates into
    /// projective space without routing through the `Field` registry.
    #[must_use]
    pub fn modulus_one_like(&self) -> Self {
        self.modulus_one()
    }

    /// Produces the additive identity of the same field as `self`.
    #[must_use]
    pub fn modulus_zero_like(&self) -> Self {
        Self { value: BigInt::zero(), modulus: self.modulus.clone() }
    }
}
