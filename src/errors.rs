// [src/errors.rs]
/*!
 * =================================================================
 * APARATO: MATH ERROR CATALOG (CORE KERNEL)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: CATÁLOGO DE FALLOS ARITMÉTICOS Y GEOMÉTRICOS
 * =================================================================
 */

use thiserror::Error;

/// Catálogo unificado de fallos del núcleo criptográfico.
///
/// Cada variante corresponde a una de las categorías descritas en el
/// diseño de manejo de errores: entradas malformadas, escalares fuera
/// de rango, fallos aritméticos, curvas inválidas, agotamiento del RNG
/// seguro, y violaciones de precondiciones internas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// Entrada hexadecimal, decimal, Base64 o WIF malformada.
    #[error("PARSE_FAULT: {0}")]
    ParseError(String),

    /// El escalar privado es cero o mayor/igual al orden de la curva.
    #[error("SCALAR_OUT_OF_RANGE: {0}")]
    ScalarOutOfRange(String),

    /// Inversión modular de cero, raíz cuadrada de un no-residuo exigida
    /// como obligatoria, o división por cero.
    #[error("ARITHMETIC_FAULT: {0}")]
    ArithmeticError(String),

    /// La curva propuesta viola su condición de discriminante.
    #[error("CURVE_INVARIANT_FAULT: {0}")]
    CurveInvariantError(String),

    /// El generador criptográficamente seguro de bytes aleatorios se
    /// agotó tras el número máximo de reintentos internos.
    #[error("RNG_FAILURE: {0}")]
    RngFailure(String),

    /// Una precondición verificada dentro de un algoritmo falló (p.ej.
    /// `D.z != 1` en la escalera de Montgomery, o un intercambio
    /// condicional invocado sobre valores ya idénticos). En esta
    /// librería estos casos se propagan como `Err` en lugar de abortar
    /// el proceso embebido; ver DESIGN.md.
    #[error("INTERNAL_INVARIANT_FAULT: {0}")]
    InternalInvariantError(String),
}
