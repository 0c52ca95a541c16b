// [src/weierstrass.rs]
/*!
 * =================================================================
 * APARATO: SHORT WEIERSTRASS GROUP LAW ENGINE (CORE MATH L1)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: LEYES DE GRUPO AFINES Y PROYECTIVAS (EFD)
 *
 * # Mathematical Proof
 * Implementa las fórmulas exactas del Explicit-Formulas Database para
 * coordenadas proyectivas homogéneas: duplicación `dbl-2007-bl` y
 * adición `add-2007-bl`, ambas generales en el coeficiente `a` de la
 * curva. La secuencia de operandos sigue la derivación EFD paso a paso
 * (no la variante Jacobiana del mismo nombre) para que el rastro de
 * multiplicaciones y restas intermedias coincida con la fórmula
 * publicada.
 * =================================================================
 */

use crate::curve::CurveDescriptor;
use crate::errors::MathError;
use crate::field::FieldElement;
use crate::point::{AffinePoint, ProjectivePoint};
use tracing::{instrument, trace};

/// Suma dos puntos afines según la ley de grupo de Weierstrass corta.
#[instrument(level = "trace", skip(curve))]
pub fn affine_add(p: &AffinePoint, q: &AffinePoint, curve: &CurveDescriptor) -> Result<AffinePoint, MathError> {
    match (p, q) {
        (AffinePoint::Infinity, _) => Ok(q.clone()),
        (_, AffinePoint::Infinity) => Ok(p.clone()),
        (AffinePoint::Point { x: x1, y: y1 }, AffinePoint::Point { x: x2, y: y2 }) => {
            if x1 == x2 {
                if y1 == &y2.negate() {
                    trace!("affine addition of mutually inverse points yields the point at infinity");
                    return Ok(AffinePoint::Infinity);
                }
                return affine_double(p, curve);
            }
            let slope = y2.sub(y1)?.div(&x2.sub(x1)?)?;
            let x3 = slope.square().sub(x1)?.sub(x2)?;
            let y3 = slope.mul(&x1.sub(&x3)?)?.sub(y1)?;
            Ok(AffinePoint::new(x3, y3))
        }
    }
}

/// Duplica un punto afín según la ley de grupo de Weierstrass corta.
#[instrument(level = "trace", skip(curve))]
pub fn affine_double(p: &AffinePoint, curve: &CurveDescriptor) -> Result<AffinePoint, MathError> {
    match p {
        AffinePoint::Infinity => Ok(AffinePoint::Infinity),
        AffinePoint::Point { y, .. } if y.is_zero() => Ok(AffinePoint::Infinity),
        AffinePoint::Point { x, y } => {
            let three = small_constant(curve, 3)?;
            let two = small_constant(curve, 2)?;
            let numerator = three.mul(&x.square())?.add(&curve.a)?;
            let denominator = two.mul(y)?;
            let slope = numerator.div(&denominator)?;
            let x3 = slope.square().sub(x)?.sub(x)?;
            let y3 = slope.mul(&x.sub(&x3)?)?.sub(y)?;
            Ok(AffinePoint::new(x3, y3))
        }
    }
}

/// Inverso aditivo de un punto afín: `-P = (x, -y)`.
#[must_use]
pub fn affine_negate(p: &AffinePoint) -> AffinePoint {
    match p {
        AffinePoint::Infinity => AffinePoint::Infinity,
        AffinePoint::Point { x, y } => AffinePoint::new(x.clone(), y.negate()),
    }
}

fn small_constant(curve: &CurveDescriptor, value: u64) -> Result<FieldElement, MathError> {
    curve.field.reduce(&crate::bigint::BigInt::from_u64(value))
}

/// Eleva un punto afín al espacio proyectivo homogéneo.
#[must_use]
pub fn to_projective(p: &AffinePoint, curve: &CurveDescriptor) -> ProjectivePoint {
    match p {
        AffinePoint::Infinity => ProjectivePoint::infinity_like(&curve.a),
        AffinePoint::Point { x, y } => ProjectivePoint::from_affine_finite(x.clone(), y.clone()),
    }
}

/// Proyecta un punto de vuelta al plano afín (`X/Z, Y/Z`).
///
/// # Errors
/// Retorna `ArithmeticError` si el punto es el elemento neutro (`Z == 0`).
#[instrument(level = "trace", skip(p))]
pub fn to_affine(p: &ProjectivePoint) -> Result<AffinePoint, MathError> {
    if p.is_infinity() {
        return Ok(AffinePoint::Infinity);
    }
    let z_inverse = p.z.invert()?;
    Ok(AffinePoint::new(p.x.mul(&z_inverse)?, p.y.mul(&z_inverse)?))
}

/// Duplicación proyectiva homogénea `dbl-2007-bl`, general en el
/// coeficiente `a`:
/// `XX=X²; ZZ=Z²; w=aZZ+3XX; s=2YZ; ss=s²; sss=s·ss; R=Ys; RR=R²;
/// B=(X+R)²−XX−RR; h=w²−2B; X₃=hs; Y₃=w(B−h)−2RR; Z₃=sss`.
#[instrument(level = "trace", skip(curve))]
pub fn projective_double(p: &ProjectivePoint, curve: &CurveDescriptor) -> Result<ProjectivePoint, MathError> {
    if p.is_infinity() || p.y.is_zero() {
        return Ok(ProjectivePoint::infinity_like(&curve.a));
    }
    let two = small_constant(curve, 2)?;
    let three = small_constant(curve, 3)?;

    let xx = p.x.square();
    let zz = p.z.square();
    let w = curve.a.mul(&zz)?.add(&three.mul(&xx)?)?;
    let s = two.mul(&p.y)?.mul(&p.z)?;
    let ss = s.square();
    let sss = s.mul(&ss)?;
    let r = p.y.mul(&s)?;
    let rr = r.square();
    let b = p.x.add(&r)?.square().sub(&xx)?.sub(&rr)?;
    let h = w.square().sub(&two.mul(&b)?)?;

    let x3 = h.mul(&s)?;
    let y3 = w.mul(&b.sub(&h)?)?.sub(&two.mul(&rr)?)?;
    let z3 = sss;

    Ok(ProjectivePoint { x: x3, y: y3, z: z3 })
}

/// Adición proyectiva homogénea `add-2007-bl`, general en el
/// coeficiente `a`:
/// `U₁=X₁Z₂; U₂=X₂Z₁; S₁=Y₁Z₂; S₂=Y₂Z₁; ZZ=Z₁Z₂; T=U₁+U₂; TT=T²;
/// M=S₁+S₂; R=TT−U₁U₂+a·ZZ²; F=ZZ·M; L=M·F; LL=L²; G=(T+L)²−TT−LL;
/// W=2R²−G; X₃=2FW; Y₃=R(G−2W)−2LL; Z₃=4F³`.
#[instrument(level = "trace", skip(curve))]
pub fn projective_add(p: &ProjectivePoint, q: &ProjectivePoint, curve: &CurveDescriptor) -> Result<ProjectivePoint, MathError> {
    if p.is_infinity() {
        return Ok(q.clone());
    }
    if q.is_infinity() {
        return Ok(p.clone());
    }

    let u1 = p.x.mul(&q.z)?;
    let u2 = q.x.mul(&p.z)?;
    let s1 = p.y.mul(&q.z)?;
    let s2 = q.y.mul(&p.z)?;

    if u1 == u2 {
        if s1 == s2 {
            return projective_double(p, curve);
        }
        return Ok(ProjectivePoint::infinity_like(&curve.a));
    }

    let two = small_constant(curve, 2)?;
    let four = small_constant(curve, 4)?;

    let zz = p.z.mul(&q.z)?;
    let t = u1.add(&u2)?;
    let tt = t.square();
    let m = s1.add(&s2)?;
    let r = tt.sub(&u1.mul(&u2)?)?.add(&curve.a.mul(&zz.square())?)?;
    let f = zz.mul(&m)?;
    let l = m.mul(&f)?;
    let ll = l.square();
    let g = t.add(&l)?.square().sub(&tt)?.sub(&ll)?;
    let w = two.mul(&r.square())?.sub(&g)?;

    let x3 = two.mul(&f)?.mul(&w)?;
    let y3 = r.mul(&g.sub(&two.mul(&w)?)?)?.sub(&two.mul(&ll)?)?;
    let z3 = four.mul(&f.square())?.mul(&f)?;

    Ok(ProjectivePoint { x: x3, y: y3, z: z3 })
}

/// Multiplicación escalar `k * P` mediante duplicar-y-sumar MSB-primero
/// sobre coordenadas proyectivas, proyectando de vuelta al plano afín
/// una sola vez al final.
#[instrument(level = "trace", skip(point, curve))]
pub fn scalar_multiply(point: &AffinePoint, scalar: &crate::bigint::BigInt, curve: &CurveDescriptor) -> Result<AffinePoint, MathError> {
    let mut accumulator = ProjectivePoint::infinity_like(&curve.a);
    let base = to_projective(point, curve);
    let bit_width = scalar.bit_width();
    for bit_index in (0..bit_width).rev() {
        accumulator = projective_double(&accumulator, curve)?;
        if scalar.bit_at(bit_index) {
            accumulator = projective_add(&accumulator, &base, curve)?;
        }
    }
    to_affine(&accumulator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{curve_by_id, CurveId};

    #[test]
    fn generator_doubling_matches_addition() {
        let curve = curve_by_id(CurveId::Secp256k1);
        let generator = AffinePoint::new(curve.generator_x.clone(), curve.generator_y.clone());
        let doubled_via_double = affine_double(&generator, &curve).unwrap();
        let doubled_via_add = affine_add(&generator, &generator, &curve).unwrap();
        assert_eq!(doubled_via_double, doubled_via_add);
    }

    #[test]
    fn projective_doubling_matches_affine_doubling() {
        let curve = curve_by_id(CurveId::Secp256k1);
        let generator = AffinePoint::new(curve.generator_x.clone(), curve.generator_y.clone());
        let affine_doubled = affine_double(&generator, &curve).unwrap();
        let projective_doubled = to_affine(&projective_double(&to_projective(&generator, &curve), &curve).unwrap()).unwrap();
        assert_eq!(affine_doubled, projective_doubled);
    }

    #[test]
    fn point_plus_its_negation_is_infinity() {
        let curve = curve_by_id(CurveId::Secp256k1);
        let generator = AffinePoint::new(curve.generator_x.clone(), curve.generator_y.clone());
        let negated = affine_negate(&generator);
        assert_eq!(affine_add(&generator, &negated, &curve).unwrap(), AffinePoint::Infinity);
    }

    #[test]
    fn scalar_multiply_by_two_matches_doubling() {
        let curve = curve_by_id(CurveId::Secp256k1);
        let generator = AffinePoint::new(curve.generator_x.clone(), curve.generator_y.clone());
        let doubled = affine_double(&generator, &curve).unwrap();
        let scaled = scalar_multiply(&generator, &crate::bigint::BigInt::from_u64(2), &curve).unwrap();
        assert_eq!(doubled, scaled);
    }
}
