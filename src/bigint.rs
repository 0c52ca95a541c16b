// [src/bigint.rs]
/*!
 * =================================================================
 * APARATO: ARBITRARY PRECISION INTEGER KERNEL (CORE MATH L1)
 * RESPONSABILIDAD: ENTEROS CON SIGNO DE PRECISIÓN ARBITRARIA
 *
 * # Mathematical Proof (Representation)
 * Un `BigInt` es un par (signo, magnitud), donde la magnitud se
 * almacena como palabras de 64 bits en orden Little-Endian sin
 * palabras altas nulas (forma normalizada). El cero siempre se
 * representa con magnitud vacía y signo positivo.
 *
 * Las operaciones bit a bit (`AND`/`OR`/`XOR`/`NOT`) y los
 * desplazamientos lógicos operan sobre la magnitud; este núcleo los
 * usa exclusivamente sobre escalares y elementos de campo, que son
 * siempre no negativos, así que esa es la precondición documentada
 * para esas operaciones en lugar de una semántica de complemento a
 * dos de ancho infinito.
 * =================================================================
 */

use crate::errors::MathError;
use std::cmp::Ordering;
use std::fmt;
use zeroize::Zeroize;

/// Entero con signo de precisión arbitraria.
#[derive(Clone, Debug, Default)]
pub struct BigInt {
    negative: bool,
    /// Palabras de 64 bits en orden Little-Endian, sin ceros altos.
    magnitude: Vec<u64>,
}

impl BigInt {
    /// Retorna el valor cero.
    #[must_use]
    pub fn zero() -> Self {
        Self { negative: false, magnitude: Vec::new() }
    }

    /// Retorna el valor uno.
    #[must_use]
    pub fn one() -> Self {
        Self::from_u64(1)
    }

    /// Construye un `BigInt` no negativo a partir de un `u64`.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        let mut result = Self { negative: false, magnitude: vec![value] };
        result.normalize();
        result
    }

    /// Construye un `BigInt` a partir de un `i64`, preservando el signo.
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        if value < 0 {
            let mut result = Self::from_u64(value.unsigned_abs());
            result.negative = !result.is_zero();
            result
        } else {
            Self::from_u64(value as u64)
        }
    }

    /// Construye la magnitud a partir de un arreglo de palabras con signo.
    ///
    /// El arreglo se interpreta como magnitud en orden Little-Endian;
    /// el signo se aplica por separado.
    #[must_use]
    pub fn from_signed_words(negative: bool, words: &[u64]) -> Self {
        let mut result = Self { negative, magnitude: words.to_vec() };
        result.normalize();
        result
    }

    /// Construye un `BigInt` no negativo a partir de bytes Big-Endian.
    #[must_use]
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let mut magnitude = Vec::with_capacity(bytes.len().div_ceil(8));
        let mut chunk_end = bytes.len();
        while chunk_end > 0 {
            let chunk_start = chunk_end.saturating_sub(8);
            let mut limb_bytes = [0u8; 8];
            let chunk = &bytes[chunk_start..chunk_end];
            limb_bytes[8 - chunk.len()..].copy_from_slice(chunk);
            magnitude.push(u64::from_be_bytes(limb_bytes));
            chunk_end = chunk_start;
        }
        let mut result = Self { negative: false, magnitude };
        result.normalize();
        result
    }

    /// Exporta la magnitud como bytes Big-Endian de longitud mínima
    /// (al menos un byte, incluso para el cero).
    #[must_use]
    pub fn to_bytes_be(&self) -> Vec<u8> {
        if self.magnitude.is_empty() {
            return vec![0u8];
        }
        let mut bytes = Vec::with_capacity(self.magnitude.len() * 8);
        for limb in self.magnitude.iter().rev() {
            bytes.extend_from_slice(&limb.to_be_bytes());
        }
        let first_nonzero = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len() - 1);
        bytes[first_nonzero..].to_vec()
    }

    /// Exporta la magnitud como bytes Big-Endian rellenados con ceros
    /// a la izquierda hasta `width` bytes.
    pub fn to_bytes_be_padded(&self, width: usize) -> Result<Vec<u8>, MathError> {
        let raw = self.to_bytes_be();
        if raw.len() > width {
            return Err(MathError::ParseError(format!(
                "VALUE_EXCEEDS_WIDTH: requires more than {width} bytes"
            )));
        }
        let mut out = vec![0u8; width];
        out[width - raw.len()..].copy_from_slice(&raw);
        Ok(out)
    }

    /// Parsea un `BigInt` hexadecimal no negativo.
    ///
    /// Acepta un prefijo `0x`/`0X` opcional, insensible a mayúsculas.
    /// Rechaza cadenas vacías y caracteres que no sean dígitos
    /// hexadecimales.
    pub fn from_hex(input: &str) -> Result<Self, MathError> {
        let trimmed = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")).unwrap_or(input);
        if trimmed.is_empty() {
            return Err(MathError::ParseError("EMPTY_HEX_INPUT".into()));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(MathError::ParseError("NON_HEX_DIGIT".into()));
        }
        let padded = if trimmed.len() % 2 == 1 { format!("0{trimmed}") } else { trimmed.to_string() };
        let bytes = hex::decode(&padded).map_err(|e| MathError::ParseError(e.to_string()))?;
        Ok(Self::from_bytes_be(&bytes))
    }

    /// Serializa la magnitud como hexadecimal, sin relleno.
    #[must_use]
    pub fn to_hex(&self, uppercase: bool) -> String {
        let bytes = self.to_bytes_be();
        // omit a leading pad byte produced for the zero case when caller wants zero digits
        let hex_digits = if uppercase { hex::encode_upper(&bytes) } else { hex::encode(&bytes) };
        let trimmed = hex_digits.trim_start_matches(['0']).to_string();
        if trimmed.is_empty() { "0".to_string() } else { trimmed }
    }

    /// Serializa la magnitud como hexadecimal de ancho fijo
    /// (p.ej. 64 caracteres para escalares de 256 bits).
    pub fn to_hex_padded(&self, hex_len: usize, uppercase: bool) -> Result<String, MathError> {
        if hex_len % 2 != 0 {
            return Err(MathError::ParseError("ODD_HEX_WIDTH_REQUESTED".into()));
        }
        let bytes = self.to_bytes_be_padded(hex_len / 2)?;
        Ok(if uppercase { hex::encode_upper(bytes) } else { hex::encode(bytes) })
    }

    /// Parsea un `BigInt` decimal con signo opcional (`-`).
    pub fn from_decimal(input: &str) -> Result<Self, MathError> {
        if input.is_empty() {
            return Err(MathError::ParseError("EMPTY_DECIMAL_INPUT".into()));
        }
        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MathError::ParseError("NON_DECIMAL_DIGIT".into()));
        }
        let mut accumulator = Self::zero();
        let ten = Self::from_u64(10);
        for digit_char in digits.chars() {
            let digit_value = Self::from_u64(digit_char.to_digit(10).unwrap() as u64);
            accumulator = accumulator.mul_signed(&ten).add_signed(&digit_value);
        }
        accumulator.negative = negative && !accumulator.is_zero();
        Ok(accumulator)
    }

    /// Serializa el valor como cadena decimal con signo.
    #[must_use]
    pub fn to_decimal(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let mut digits = Vec::new();
        let mut remainder = Self { negative: false, magnitude: self.magnitude.clone() };
        let ten = Self::from_u64(10);
        while !remainder.is_zero() {
            let (quotient, digit) = remainder.div_rem(&ten).expect("division by ten never fails");
            let digit_value = digit.magnitude.first().copied().unwrap_or(0);
            digits.push(std::char::from_digit(digit_value as u32, 10).unwrap());
            remainder = quotient;
        }
        if self.negative {
            digits.push('-');
        }
        digits.iter().rev().collect()
    }

    /// Verdadero si el valor es exactamente cero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_empty()
    }

    /// Verdadero si el valor es negativo.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Verdadero si el bit menos significativo está activo.
    #[must_use]
    pub fn is_odd(&self) -> bool {
        self.magnitude.first().is_some_and(|w| w & 1 == 1)
    }

    /// Ancho en bits de la magnitud (0 para el cero).
    #[must_use]
    pub fn bit_width(&self) -> usize {
        match self.magnitude.last() {
            None => 0,
            Some(&top_limb) => (self.magnitude.len() - 1) * 64 + (64 - top_limb.leading_zeros() as usize),
        }
    }

    /// Lee el bit de la magnitud en la posición `index` (0 = menos
    /// significativo). Retorna `false` más allá del ancho de la
    /// magnitud.
    #[must_use]
    pub fn bit_at(&self, index: usize) -> bool {
        let limb_index = index / 64;
        let bit_index = index % 64;
        match self.magnitude.get(limb_index) {
            Some(limb) => (limb >> bit_index) & 1 == 1,
            None => false,
        }
    }

    /// Retorna el valor absoluto.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self { negative: false, magnitude: self.magnitude.clone() }
    }

    /// Retorna la negación aritmética.
    #[must_use]
    pub fn negate(&self) -> Self {
        let mut result = self.clone();
        if !result.is_zero() {
            result.negative = !result.negative;
        }
        result
    }

    fn normalize(&mut self) {
        while matches!(self.magnitude.last(), Some(0)) {
            self.magnitude.pop();
        }
        if self.magnitude.is_empty() {
            self.negative = false;
        }
    }

    fn compare_magnitude(lhs: &[u64], rhs: &[u64]) -> Ordering {
        if lhs.len() != rhs.len() {
            return lhs.len().cmp(&rhs.len());
        }
        for (l, r) in lhs.iter().rev().zip(rhs.iter().rev()) {
            match l.cmp(r) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    fn add_magnitude(lhs: &[u64], rhs: &[u64]) -> Vec<u64> {
        let mut result = Vec::with_capacity(lhs.len().max(rhs.len()) + 1);
        let mut carry: u128 = 0;
        for index in 0..lhs.len().max(rhs.len()) {
            let sum = lhs.get(index).copied().unwrap_or(0) as u128
                + rhs.get(index).copied().unwrap_or(0) as u128
                + carry;
            result.push(sum as u64);
            carry = sum >> 64;
        }
        if carry > 0 {
            result.push(carry as u64);
        }
        result
    }

    /// Asume `lhs >= rhs`.
    fn sub_magnitude(lhs: &[u64], rhs: &[u64]) -> Vec<u64> {
        let mut result = Vec::with_capacity(lhs.len());
        let mut borrow: i128 = 0;
        for index in 0..lhs.len() {
            let diff = lhs[index] as i128 - rhs.get(index).copied().unwrap_or(0) as i128 - borrow;
            if diff < 0 {
                result.push((diff + (1i128 << 64)) as u64);
                borrow = 1;
            } else {
                result.push(diff as u64);
                borrow = 0;
            }
        }
        result
    }

    fn mul_magnitude(lhs: &[u64], rhs: &[u64]) -> Vec<u64> {
        if lhs.is_empty() || rhs.is_empty() {
            return Vec::new();
        }
        let mut result = vec![0u64; lhs.len() + rhs.len()];
        for (i, &lhs_limb) in lhs.iter().enumerate() {
            let mut carry: u128 = 0;
            for (j, &rhs_limb) in rhs.iter().enumerate() {
                let product = lhs_limb as u128 * rhs_limb as u128 + result[i + j] as u128 + carry;
                result[i + j] = product as u64;
                carry = product >> 64;
            }
            let mut k = i + rhs.len();
            while carry > 0 {
                let sum = result[k] as u128 + carry;
                result[k] = sum as u64;
                carry = sum >> 64;
                k += 1;
            }
        }
        result
    }

    /// Suma con acarreo de signo.
    #[must_use]
    pub fn add_signed(&self, other: &Self) -> Self {
        let mut result = if self.negative == other.negative {
            Self { negative: self.negative, magnitude: Self::add_magnitude(&self.magnitude, &other.magnitude) }
        } else {
            match Self::compare_magnitude(&self.magnitude, &other.magnitude) {
                Ordering::Equal => Self::zero(),
                Ordering::Greater => Self {
                    negative: self.negative,
                    magnitude: Self::sub_magnitude(&self.magnitude, &other.magnitude),
                },
                Ordering::Less => Self {
                    negative: other.negative,
                    magnitude: Self::sub_magnitude(&other.magnitude, &self.magnitude),
                },
            }
        };
        result.normalize();
        result
    }

    /// Resta con acarreo de signo.
    #[must_use]
    pub fn sub_signed(&self, other: &Self) -> Self {
        self.add_signed(&other.negate())
    }

    /// Multiplicación con signo.
    #[must_use]
    pub fn mul_signed(&self, other: &Self) -> Self {
        let mut result = Self {
            negative: self.negative != other.negative,
            magnitude: Self::mul_magnitude(&self.magnitude, &other.magnitude),
        };
        result.normalize();
        result
    }

    /// División truncada hacia cero junto con el resto, con el signo
    /// del dividendo (semántica equivalente a la división entera de
    /// Rust). Falla con `ArithmeticError` si el divisor es cero.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), MathError> {
        if divisor.is_zero() {
            return Err(MathError::ArithmeticError("DIV_BY_ZERO".into()));
        }
        let bit_width = self.bit_width();
        let mut quotient_magnitude = vec![0u64; (bit_width / 64) + 1];
        let mut remainder = Self::zero();
        let divisor_abs = divisor.abs();
        for bit_index in (0..bit_width).rev() {
            remainder = remainder.shift_left(1);
            if self.bit_at(bit_index) {
                remainder.magnitude.resize(remainder.magnitude.len().max(1), 0);
                if remainder.magnitude.is_empty() {
                    remainder.magnitude.push(1);
                } else {
                    remainder.magnitude[0] |= 1;
                }
            }
            if Self::compare_magnitude(&remainder.magnitude, &divisor_abs.magnitude) != Ordering::Less {
                remainder = Self {
                    negative: false,
                    magnitude: Self::sub_magnitude(&remainder.magnitude, &divisor_abs.magnitude),
                };
                remainder.normalize();
                quotient_magnitude[bit_index / 64] |= 1u64 << (bit_index % 64);
            }
        }
        let mut quotient = Self { negative: self.negative != divisor.negative, magnitude: quotient_magnitude };
        quotient.normalize();
        remainder.negative = self.negative && !remainder.is_zero();
        Ok((quotient, remainder))
    }

    /// Reducción Euclidiana: el resultado siempre reside en `[0, m)`
    /// para `m > 0`.
    pub fn modulo(&self, modulus: &Self) -> Result<Self, MathError> {
        if modulus.is_zero() || modulus.is_negative() {
            return Err(MathError::ArithmeticError("MODULUS_MUST_BE_POSITIVE".into()));
        }
        let (_, remainder) = self.div_rem(modulus)?;
        if remainder.is_negative() {
            Ok(remainder.add_signed(modulus))
        } else {
            Ok(remainder)
        }
    }

    /// Aplica una reducción Euclidiana a un valor producido de forma
    /// diferida por un cierre. El contrato observable es idéntico a
    /// llamar `modulo` sobre el valor ya calculado; el cierre solo
    /// existe para permitir que el llamador evite materializar el
    /// resultado intermedio cuando no es necesario.
    pub fn modulo_of<F: FnOnce() -> Self>(deferred: F, modulus: &Self) -> Result<Self, MathError> {
        deferred().modulo(modulus)
    }

    /// Desplazamiento lógico a la izquierda (multiplica por 2^n).
    #[must_use]
    pub fn shift_left(&self, bits: usize) -> Self {
        if self.is_zero() || bits == 0 {
            return self.clone();
        }
        let limb_shift = bits / 64;
        let bit_shift = bits % 64;
        let mut magnitude = vec![0u64; self.magnitude.len() + limb_shift + 1];
        for (index, &limb) in self.magnitude.iter().enumerate() {
            if bit_shift == 0 {
                magnitude[index + limb_shift] |= limb;
            } else {
                magnitude[index + limb_shift] |= limb << bit_shift;
                magnitude[index + limb_shift + 1] |= limb >> (64 - bit_shift);
            }
        }
        let mut result = Self { negative: self.negative, magnitude };
        result.normalize();
        result
    }

    /// Desplazamiento lógico a la derecha (división entera por 2^n).
    #[must_use]
    pub fn shift_right(&self, bits: usize) -> Self {
        if self.is_zero() || bits == 0 {
            return self.clone();
        }
        let limb_shift = bits / 64;
        let bit_shift = bits % 64;
        if limb_shift >= self.magnitude.len() {
            return Self::zero();
        }
        let mut magnitude = vec![0u64; self.magnitude.len() - limb_shift];
        for index in 0..magnitude.len() {
            let low = self.magnitude[index + limb_shift] >> bit_shift;
            let high = if bit_shift == 0 || index + limb_shift + 1 >= self.magnitude.len() {
                0
            } else {
                self.magnitude[index + limb_shift + 1] << (64 - bit_shift)
            };
            magnitude[index] = low | high;
        }
        let mut result = Self { negative: self.negative, magnitude };
        result.normalize();
        result
    }

    fn zip_magnitude(&self, other: &Self, op: impl Fn(u64, u64) -> u64) -> Self {
        let len = self.magnitude.len().max(other.magnitude.len());
        let mut magnitude = Vec::with_capacity(len);
        for index in 0..len {
            let a = self.magnitude.get(index).copied().unwrap_or(0);
            let b = other.magnitude.get(index).copied().unwrap_or(0);
            magnitude.push(op(a, b));
        }
        let mut result = Self { negative: false, magnitude };
        result.normalize();
        result
    }

    /// AND bit a bit. Precondición: ambos operandos son no negativos.
    #[must_use]
    pub fn bitand(&self, other: &Self) -> Self {
        self.zip_magnitude(other, |a, b| a & b)
    }

    /// OR bit a bit. Precondición: ambos operandos son no negativos.
    #[must_use]
    pub fn bitor(&self, other: &Self) -> Self {
        self.zip_magnitude(other, |a, b| a | b)
    }

    /// XOR bit a bit. Precondición: ambos operandos son no negativos.
    #[must_use]
    pub fn bitxor(&self, other: &Self) -> Self {
        self.zip_magnitude(other, |a, b| a ^ b)
    }

    /// Complemento dentro del ancho de bits propio del valor
    /// (`2^bit_width - 1 - self`). Precondición: el operando es no
    /// negativo. No representa un complemento a dos de ancho infinito.
    #[must_use]
    pub fn bitnot(&self) -> Self {
        let width = self.bit_width().max(1);
        let full_mask = Self::one().shift_left(width).sub_signed(&Self::one());
        full_mask.sub_signed(self)
    }

    /// Exponenciación modular `base^exp mod modulus` mediante
    /// cuadrado-y-multiplica MSB-primero. Requiere `exp >= 0`.
    pub fn pow_mod(base: &Self, exponent: &Self, modulus: &Self) -> Result<Self, MathError> {
        if exponent.is_negative() {
            return Err(MathError::ArithmeticError("NEGATIVE_EXPONENT_NOT_SUPPORTED".into()));
        }
        if modulus.is_zero() || modulus.is_negative() {
            return Err(MathError::ArithmeticError("MODULUS_MUST_BE_POSITIVE".into()));
        }
        let mut result = Self::one().modulo(modulus)?;
        let mut reduced_base = base.modulo(modulus)?;
        let bit_width = exponent.bit_width();
        for bit_index in 0..bit_width {
            if exponent.bit_at(bit_index) {
                result = result.mul_signed(&reduced_base).modulo(modulus)?;
            }
            reduced_base = reduced_base.mul_signed(&reduced_base).modulo(modulus)?;
        }
        Ok(result)
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.negative == other.negative && self.magnitude == other.magnitude
    }
}

impl Eq for BigInt {}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => Self::compare_magnitude(&self.magnitude, &other.magnitude),
            (true, true) => Self::compare_magnitude(&other.magnitude, &self.magnitude),
        }
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<i64> for BigInt {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl Zeroize for BigInt {
    fn zeroize(&mut self) {
        self.magnitude.zeroize();
        self.magnitude.clear();
        self.negative = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_hex_and_decimal() {
        let value = BigInt::from_decimal("123456789012345678901234567890").unwrap();
        let hex = value.to_hex(false);
        assert_eq!(BigInt::from_hex(&hex).unwrap(), value);
        assert_eq!(value.to_decimal(), "123456789012345678901234567890");
    }

    #[test]
    fn division_matches_known_values() {
        let a = BigInt::from_u64(100);
        let b = BigInt::from_u64(7);
        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(q, BigInt::from_u64(14));
        assert_eq!(r, BigInt::from_u64(2));
    }

    #[test]
    fn euclidean_modulo_is_nonnegative_for_negative_input() {
        let a = BigInt::from_i64(-7);
        let m = BigInt::from_u64(5);
        assert_eq!(a.modulo(&m).unwrap(), BigInt::from_u64(3));
    }

    #[test]
    fn bit_width_and_bit_at_agree() {
        let value = BigInt::from_u64(0b1011);
        assert_eq!(value.bit_width(), 4);
        assert!(value.bit_at(0));
        assert!(!value.bit_at(1));
        assert!(value.bit_at(3));
        assert!(!value.bit_at(4));
    }

    #[test]
    fn div_by_zero_is_an_arithmetic_error() {
        let a = BigInt::from_u64(10);
        assert!(a.div_rem(&BigInt::zero()).is_err());
    }

    #[test]
    fn pow_mod_matches_known_value() {
        let result = BigInt::pow_mod(&BigInt::from_u64(4), &BigInt::from_u64(13), &BigInt::from_u64(497)).unwrap();
        assert_eq!(result, BigInt::from_u64(445));
    }
}
