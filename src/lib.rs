// [src/lib.rs]
#![deny(missing_docs)]

/*!
 * =================================================================
 * APARATO: CORE MATH MASTER HUB (CORE MATH L1)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ORQUESTACIÓN DE PRIMITIVAS MATEMÁTICAS
 *
 * # Mathematical Proof (Modular Integrity)
 * Este aparato actúa como el nodo raíz del grafo matemático: enteros
 * de precisión arbitraria (`bigint`), aritmética de cuerpo finito
 * parametrizada en tiempo de ejecución (`field`), modelos de punto
 * afín/proyectivo/Montgomery-XZ (`point`), el registro de parámetros
 * de curva (`curve`), los motores de ley de grupo de Weierstrass corta
 * y de escalera de Montgomery (`weierstrass`, `montgomery`), y la
 * derivación de claves que se apoya en todo lo anterior
 * (`private_key`, `public_key`).
 * =================================================================
 */

/// Enteros con signo de precisión arbitraria.
pub mod bigint;
/// Registro de parámetros de curva y condiciones de no-singularidad.
pub mod curve;
/// Catálogo de fallos criptográficos y matemáticos del sistema.
pub mod errors;
/// Aritmética de cuerpo finito Fp parametrizada por un primo arbitrario.
pub mod field;
/// Motor de escalera diferencial de Montgomery sobre coordenadas XZ.
pub mod montgomery;
/// Modelos de punto: afín, proyectivo homogéneo, y Montgomery XZ.
pub mod point;
/// Gestión segura de escalares secretos (claves privadas).
pub mod private_key;
/// Derivación y serialización SEC1 de claves públicas.
pub mod public_key;
/// Fuente de aleatoriedad segura inyectable para la aleatorización
/// proyectiva de Coron.
pub mod rng;
/// Leyes de grupo afines y proyectivas de Weierstrass corta (EFD).
pub mod weierstrass;

/**
 * PRELUDIO MATEMÁTICO SOBERANO
 *
 * Única autoridad de importación recomendada para los consumidores de
 * este motor. Centraliza la nomenclatura pública.
 */
pub mod prelude {
    pub use crate::bigint::BigInt;
    pub use crate::curve::{curve_by_id, CurveDescriptor, CurveForm, CurveId};
    pub use crate::errors::MathError;
    pub use crate::field::{Field, FieldElement};
    pub use crate::montgomery;
    pub use crate::point::{AffinePoint, MontgomeryPoint, ProjectivePoint};
    pub use crate::private_key::PrivateKey;
    pub use crate::public_key::{PublicKey, PublicKeyPoint};
    pub use crate::rng::{FixedSeedRng, OsSecureRng, SecureRng};
    pub use crate::weierstrass;
}
