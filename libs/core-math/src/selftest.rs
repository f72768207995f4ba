// [libs/core-math/src/selftest.rs]
//! Auto-test de correctud del motor, ejecutado una vez al arrancar el
//! escáner, antes de lanzar ningún trabajador.
//!
//! Una regresión silenciosa en la aritmética de campo o en el pipeline de
//! hashing haría que el escáner recorriera el espacio de búsqueda entero
//! sin jamás poder encontrar la clave, incluso si esta estuviera en el
//! rango explorado. Este módulo existe para convertir ese fallo silencioso
//! en un `Err` inmediato al arranque.

use crate::curve::UnifiedCurveEngine;
use crate::errors::MathError;
use crate::field::FieldElement;
use crate::generator::seed_mul;
use crate::hashing::hash160_of_compressed_pubkey;
use crate::point::JacobianPoint;
use crate::scalar::Scalar;

/// Vector de prueba conocido: la clave privada `k = 1` produce el punto
/// generador `G`, cuya clave pública comprimida es de dominio público.
const GENERATOR_COMPRESSED_PUBKEY: [u8; 33] = [
    0x02, 0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b, 0x07, 0x02, 0x9b,
    0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8, 0x17, 0x98,
];

/// Hash160 conocido de la clave pública comprimida del generador (calculado
/// independientemente y fijado como vector de regresión).
const GENERATOR_HASH160: [u8; 20] = [
    0x75, 0x1e, 0x76, 0xe8, 0x19, 0x91, 0x96, 0xd4, 0x54, 0x94, 0x1c, 0x45, 0xd1, 0xb3, 0xa3, 0x23, 0xf1, 0x43, 0x3b,
    0xd6,
];

/// Ejecuta las comprobaciones de correctud descritas en la especificación:
/// multiplicación escalar de base fija, suma Jacobiana secuencial,
/// conversión afín por lote, y pipeline de hashing especializado.
///
/// # Errors
/// Retorna el primer [`MathError`] encontrado, o [`MathError::InvalidScalar`]
/// si un resultado numérico no coincide con el vector de prueba esperado.
pub fn run_correctness_selftest() -> Result<(), MathError> {
    verify_seed_multiplication_against_known_generator()?;
    verify_sequential_walk_matches_direct_scalar_multiplication()?;
    verify_batch_affine_conversion_matches_scalar_multiplication()?;
    verify_hash_pipeline_against_known_vector()?;
    Ok(())
}

/// Comprobación 1: `seed_mul(1)` debe producir exactamente la clave pública
/// comprimida del generador `G`.
fn verify_seed_multiplication_against_known_generator() -> Result<(), MathError> {
    let one = Scalar::from_u64(1);
    let point = seed_mul(&one)?;
    let z_inverse = point.z_coordinate.invert()?;
    let compressed = point.to_compressed_sec1_with_inverse(&z_inverse)?;

    if compressed != GENERATOR_COMPRESSED_PUBKEY {
        return Err(MathError::InvalidScalar);
    }
    Ok(())
}

/// Comprobación 2: caminar `G + G + G` sumando `G` dos veces de forma
/// secuencial debe coincidir con `seed_mul(3)` calculado directamente.
fn verify_sequential_walk_matches_direct_scalar_multiplication() -> Result<(), MathError> {
    let one = Scalar::from_u64(1);
    let three = Scalar::from_u64(3);

    let generator_point = seed_mul(&one)?;
    let generator_affine_z_inverse = generator_point.z_coordinate.invert()?;
    let generator_affine_x = generator_point
        .x_coordinate
        .multiply_modular(&generator_affine_z_inverse.square_modular());
    let generator_affine_y = generator_point
        .y_coordinate
        .multiply_modular(&generator_affine_z_inverse.square_modular().multiply_modular(&generator_affine_z_inverse));

    let mut walked_point: JacobianPoint =
        UnifiedCurveEngine::add_mixed_deterministic(&generator_point, &generator_affine_x, &generator_affine_y);
    walked_point = UnifiedCurveEngine::add_mixed_deterministic(&walked_point, &generator_affine_x, &generator_affine_y);

    let direct_point = seed_mul(&three)?;

    let normalize = |point: JacobianPoint| -> Result<(FieldElement, FieldElement), MathError> {
        let z_inverse = point.z_coordinate.invert()?;
        let z_inverse_squared = z_inverse.square_modular();
        Ok((
            point.x_coordinate.multiply_modular(&z_inverse_squared),
            point.y_coordinate.multiply_modular(&z_inverse_squared.multiply_modular(&z_inverse)),
        ))
    };

    if normalize(walked_point)? != normalize(direct_point)? {
        return Err(MathError::InvalidScalar);
    }
    Ok(())
}

/// Comprobación 3: convertir el lote Jacobiano `{G, 2G, 3G, 4G}` a afín con
/// una única inversión simultánea (`batch_invert_into`) debe serializar a
/// las mismas claves públicas comprimidas que multiplicar el generador por
/// `{1, 2, 3, 4}` directamente, una a la vez.
fn verify_batch_affine_conversion_matches_scalar_multiplication() -> Result<(), MathError> {
    const BATCH_LENGTH: usize = 4;

    let one = Scalar::from_u64(1);
    let generator_point = seed_mul(&one)?;
    let generator_affine_z_inverse = generator_point.z_coordinate.invert()?;
    let generator_affine_x = generator_point
        .x_coordinate
        .multiply_modular(&generator_affine_z_inverse.square_modular());
    let generator_affine_y = generator_point.y_coordinate.multiply_modular(
        &generator_affine_z_inverse.square_modular().multiply_modular(&generator_affine_z_inverse),
    );

    let mut jacobian_batch: Vec<JacobianPoint> = Vec::with_capacity(BATCH_LENGTH);
    let mut walking_point = generator_point;
    jacobian_batch.push(walking_point);
    for _ in 1..BATCH_LENGTH {
        walking_point =
            UnifiedCurveEngine::add_mixed_deterministic(&walking_point, &generator_affine_x, &generator_affine_y);
        jacobian_batch.push(walking_point);
    }

    let z_coordinates: Vec<FieldElement> = jacobian_batch.iter().map(|point| point.z_coordinate).collect();
    let mut batch_inverses = vec![FieldElement::default(); BATCH_LENGTH];
    let mut scratch = vec![FieldElement::default(); BATCH_LENGTH];
    FieldElement::batch_invert_into(&z_coordinates, &mut batch_inverses, &mut scratch)?;

    for (offset, point) in jacobian_batch.iter().enumerate() {
        let batch_compressed = point.to_compressed_sec1_with_inverse(&batch_inverses[offset])?;
        let direct_scalar = Scalar::from_u64(offset as u64 + 1);
        let direct_point = seed_mul(&direct_scalar)?;
        let direct_z_inverse = direct_point.z_coordinate.invert()?;
        let direct_compressed = direct_point.to_compressed_sec1_with_inverse(&direct_z_inverse)?;

        if batch_compressed != direct_compressed {
            return Err(MathError::InvalidScalar);
        }
    }
    Ok(())
}

/// Comprobación 4: el pipeline de hashing especializado debe reproducir el
/// hash160 conocido de la clave pública comprimida del generador.
fn verify_hash_pipeline_against_known_vector() -> Result<(), MathError> {
    let computed = hash160_of_compressed_pubkey(&GENERATOR_COMPRESSED_PUBKEY);
    if computed != GENERATOR_HASH160 {
        return Err(MathError::InvalidScalar);
    }
    Ok(())
}
