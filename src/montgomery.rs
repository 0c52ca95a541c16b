// [src/montgomery.rs]
/*!
 * =================================================================
 * APARATO: MONTGOMERY LADDER ENGINE (CORE MATH L1)
 * RESPONSABILIDAD: ESCALERA DIFERENCIAL SOBRE COORDENADAS XZ
 *
 * # Mathematical Proof
 * El paso de escalera implementa `mladd-1987-m-3`: dado un punto base
 * cuya coordenada x es `X1` (con `Z1 = 1`), y dos acumuladores
 * `(X2:Z2) = nP` y `(X3:Z3) = (n+1)P`, produce `(2n)P` y `(2n+1)P` en
 * una sola llamada, sin jamás materializar la coordenada `y`.
 *
 * # REDESIGN FLAG
 * El recorrido de bits del escalar es MSB-primero. Una fuente anterior
 * de este algoritmo recorría los bits LSB-primero, lo cual invierte la
 * semántica de la bandera de intercambio condicional y produce un
 * resultado incorrecto; ese defecto no se reproduce aquí.
 * =================================================================
 */

use crate::bigint::BigInt;
use crate::curve::CurveDescriptor;
use crate::errors::MathError;
use crate::field::FieldElement;
use crate::point::MontgomeryPoint;
use crate::rng::SecureRng;
use tracing::{instrument, trace};

/// Intercambio condicional de tiempo constante entre dos puntos de
/// Montgomery, mediante la técnica de máscara/delta XOR: se calcula
/// una máscara de todo-ceros o todo-unos a partir de la bandera
/// `swap`, y cada coordenada se actualiza con
/// `coordinate ^= mask & (other_coordinate ^ coordinate)`.
///
/// # Errors
/// Retorna `InternalInvariantError` si los dos puntos pertenecen a
/// cuerpos con módulos distintos; la máscara XOR solo es sólida
/// cuando ambos operandos comparten el mismo cuerpo finito.
pub fn cswap(swap: bool, a: &mut MontgomeryPoint, b: &mut MontgomeryPoint) -> Result<(), MathError> {
    if a.x.modulus() != b.x.modulus() {
        return Err(MathError::InternalInvariantError("CSWAP_OPERANDS_BELONG_TO_DIFFERENT_FIELDS".into()));
    }
    let mask = if swap { all_ones_mask(a.x.modulus()) } else { BigInt::zero() };

    let x_delta = a.x.value().bitxor(b.x.value()).bitand(&mask);
    let new_ax = a.x.value().bitxor(&x_delta);
    let new_bx = b.x.value().bitxor(&x_delta);

    let z_delta = a.z.value().bitxor(b.z.value()).bitand(&mask);
    let new_az = a.z.value().bitxor(&z_delta);
    let new_bz = b.z.value().bitxor(&z_delta);

    a.x = a.x.field_clone_with(new_ax);
    b.x = b.x.field_clone_with(new_bx);
    a.z = a.z.field_clone_with(new_az);
    b.z = b.z.field_clone_with(new_bz);
    Ok(())
}

fn all_ones_mask(modulus: &BigInt) -> BigInt {
    BigInt::one().shift_left(modulus.bit_width()).sub_signed(&BigInt::one())
}

/// Paso combinado de duplicación y adición diferencial (`mladd-1987-m-3`).
///
/// Toma la coordenada x del punto base (`x1`, con `z1` implícito en 1),
/// el acumulador `(x2:z2) = nP`, el acumulador `(x3:z3) = (n+1)P`, y la
/// constante derivada `a24 = (A + 2)/4`. Retorna `((2n)P, (2n+1)P)`.
#[instrument(level = "trace", skip_all)]
pub fn ladder_step(
    x1: &FieldElement,
    x2: &FieldElement,
    z2: &FieldElement,
    x3: &FieldElement,
    z3: &FieldElement,
    a24: &FieldElement,
) -> Result<(FieldElement, FieldElement, FieldElement, FieldElement), MathError> {
    let a = x2.add(z2)?;
    let aa = a.square();
    let b = x2.sub(z2)?;
    let bb = b.square();
    let e = aa.sub(&bb)?;
    let c = x3.add(z3)?;
    let d = x3.sub(z3)?;
    let da = d.mul(&a)?;
    let cb = c.mul(&b)?;

    let x3_new = da.add(&cb)?.square();
    let z3_new = x1.mul(&da.sub(&cb)?.square())?;
    let x2_new = aa.mul(&bb)?;
    let z2_new = e.mul(&aa.add(&a24.mul(&e)?)?)?;

    Ok((x2_new, z2_new, x3_new, z3_new))
}

/// Multiplicación escalar `k * P` mediante la escalera de Montgomery,
/// recorriendo los bits del escalar de más a menos significativo.
///
/// El acumulador `S` se inicializa a `P` y de inmediato se somete a la
/// aleatorización proyectiva de Coron (1999) extraída de `rng`, tal
/// como exige el paso 3 de la escalera: la clase de equivalencia
/// proyectiva de `S` no cambia, pero su representación concreta sí,
/// negando a un atacante de canal lateral una traza de coordenadas
/// estable entre invocaciones.
#[instrument(level = "trace", skip(base_x, curve, rng))]
pub fn ladder_multiply(
    scalar: &BigInt,
    base_x: &FieldElement,
    curve: &CurveDescriptor,
    rng: &mut dyn SecureRng,
) -> Result<MontgomeryPoint, MathError> {
    let a24 = curve.montgomery_a24.as_ref().ok_or_else(|| {
        MathError::CurveInvariantError("LADDER_MULTIPLY_REQUIRES_A_MONTGOMERY_CURVE".into())
    })?;

    let mut accumulator_n = MontgomeryPoint::infinity_like(base_x);
    let mut accumulator_n_plus_one = projective_randomise(&MontgomeryPoint::from_affine_x(base_x.clone()), rng)?;

    let bit_width = scalar.bit_width();
    let mut swap = false;
    for bit_index in (0..bit_width).rev() {
        let current_bit = scalar.bit_at(bit_index);
        swap ^= current_bit;
        cswap(swap, &mut accumulator_n, &mut accumulator_n_plus_one)?;
        swap = current_bit;

        let (x2, z2, x3, z3) = ladder_step(
            base_x,
            &accumulator_n.x,
            &accumulator_n.z,
            &accumulator_n_plus_one.x,
            &accumulator_n_plus_one.z,
            a24,
        )?;
        accumulator_n = MontgomeryPoint { x: x2, z: z2 };
        accumulator_n_plus_one = MontgomeryPoint { x: x3, z: z3 };
    }
    cswap(swap, &mut accumulator_n, &mut accumulator_n_plus_one)?;
    trace!("montgomery ladder completed over {bit_width} bits");
    Ok(accumulator_n)
}

/// Aleatorización proyectiva (contramedida DPA de Coron, 1999): escala
/// ambas coordenadas del punto por un elemento de campo no nulo
/// extraído de `rng`, preservando la clase de equivalencia proyectiva
/// `(X:Z) ~ (rX:rZ)` mientras oculta la representación concreta usada
/// en cada invocación de la escalera.
#[instrument(level = "trace", skip(point, rng))]
pub fn projective_randomise(point: &MontgomeryPoint, rng: &mut dyn SecureRng) -> Result<MontgomeryPoint, MathError> {
    let modulus = point.x.modulus().clone();
    let byte_width = modulus.to_bytes_be().len().max(1);
    let mut buffer = vec![0u8; byte_width];
    let blinding_factor = loop {
        rng.fill_bytes(&mut buffer)?;
        let candidate = BigInt::from_bytes_be(&buffer).modulo(&modulus)?;
        if !candidate.is_zero() {
            break candidate;
        }
    };
    let blinding_element = point.x.field_clone_with(blinding_factor);
    Ok(MontgomeryPoint { x: point.x.mul(&blinding_element)?, z: point.z.mul(&blinding_element)? })
}

impl FieldElement {
    /// Produces a new element in the same field carrying `value`.
    /// Used internally by the ladder/cswap machinery, which works with
    /// raw `BigInt` bit patterns rather than the `Field::reduce` seam.
    pub(crate) fn field_clone_with(&self, value: BigInt) -> Self {
        Self::from_raw_parts(value, self.modulus().clone())
    }
}
