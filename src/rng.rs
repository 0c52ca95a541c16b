// [src/rng.rs]
/*!
 * =================================================================
 * APARATO: SECURE RANDOMNESS SEAM (CORE MATH L1)
 * RESPONSABILIDAD: ABSTRACCIÓN INYECTABLE DE BYTES ALEATORIOS SEGUROS
 *
 * # Design Note (Deterministic nondeterminism)
 * La aleatorización proyectiva de Coron consume bytes aleatorios en
 * cada invocación de la escalera de Montgomery. Para que las pruebas
 * sean reproducibles sin sacrificar la imprevisibilidad en producción,
 * la fuente de bytes se inyecta por trait en lugar de llamarse
 * directamente desde el sistema operativo.
 * =================================================================
 */

use crate::errors::MathError;
use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand::rngs::StdRng;

/// Fuente de bytes criptográficamente impredecibles.
pub trait SecureRng {
    /// Llena `destination` con bytes aleatorios.
    ///
    /// # Errors
    /// Retorna `RngFailure` si la fuente subyacente se agota o falla.
    fn fill_bytes(&mut self, destination: &mut [u8]) -> Result<(), MathError>;
}

/// Implementación de producción respaldada por el generador seguro del
/// sistema operativo.
#[derive(Debug, Default)]
pub struct OsSecureRng;

impl SecureRng for OsSecureRng {
    fn fill_bytes(&mut self, destination: &mut [u8]) -> Result<(), MathError> {
        OsRng.try_fill_bytes(destination).map_err(|error| MathError::RngFailure(error.to_string()))
    }
}

/// Implementación determinista para pruebas: misma semilla, misma
/// secuencia de bytes. Nunca debe usarse fuera de `#[cfg(test)]`.
#[derive(Debug)]
pub struct FixedSeedRng {
    inner: StdRng,
}

impl FixedSeedRng {
    /// Construye un generador determinista a partir de una semilla de
    /// 32 bytes.
    #[must_use]
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self { inner: StdRng::from_seed(seed) }
    }
}

impl SecureRng for FixedSeedRng {
    fn fill_bytes(&mut self, destination: &mut [u8]) -> Result<(), MathError> {
        self.inner.try_fill_bytes(destination).map_err(|error| MathError::RngFailure(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_seed_rng_is_deterministic() {
        let mut a = FixedSeedRng::from_seed([7u8; 32]);
        let mut b = FixedSeedRng::from_seed([7u8; 32]);
        let mut out_a = [0u8; 16];
        let mut out_b = [0u8; 16];
        a.fill_bytes(&mut out_a).unwrap();
        b.fill_bytes(&mut out_b).unwrap();
        assert_eq!(out_a, out_b);
    }
}
