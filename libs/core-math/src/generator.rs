// [libs/core-math/src/generator.rs]
//! Multiplicación escalar de base fija: `k -> k*G`.
//!
//! En vez de reimplementar una tabla de multiplicación por ventanas (el
//! camino caliente de este motor es la suma secuencial Jacobiana, no la
//! multiplicación escalar repetida), la semilla de cada lote se calcula
//! delegando en la librería `secp256k1`, que ya trae una tabla de
//! multiplicación de base fija constante en tiempo.

use crate::context::global_context;
use crate::errors::MathError;
use crate::field::FieldElement;
use crate::point::JacobianPoint;
use crate::scalar::Scalar;

/// Calcula `k*G` para el escalar de semilla `scalar_seed`, retornando el
/// punto resultante en coordenadas Jacobianas (`Z = 1`).
///
/// Esta es la única multiplicación escalar de base fija que el motor
/// realiza por lote: todo avance posterior dentro del lote es una suma
/// Jacobiana secuencial vía [`crate::curve::UnifiedCurveEngine`].
///
/// # Errors
/// Retorna [`MathError::EllipticCurveError`] si `scalar_seed` no es una
/// clave secreta válida para la librería subyacente (no debería ocurrir:
/// [`Scalar`] ya garantiza `0 < k < n`).
pub fn seed_mul(scalar_seed: &Scalar) -> Result<JacobianPoint, MathError> {
    let secret_key = secp256k1::SecretKey::from_slice(&scalar_seed.to_u256_be())?;
    let public_key = secp256k1::PublicKey::from_secret_key(global_context(), &secret_key);
    let compressed = public_key.serialize();
    JacobianPoint::from_compressed_sec1(&compressed)
}

/// Las coordenadas afines fijas del generador `G`, usadas como el paso de
/// adición de [`crate::curve::UnifiedCurveEngine::walk_batch`].
///
/// `G` siempre tiene `Z = 1`, así que su inversión nunca falla.
#[must_use]
pub fn generator_affine_coordinates() -> (FieldElement, FieldElement) {
    let generator_point = seed_mul(&Scalar::from_u64(1)).expect("G is always a valid point");
    let z_inverse = generator_point.z_coordinate.invert().expect("G has Z = 1, never zero");
    let z_inverse_squared = z_inverse.square_modular();
    let affine_x = generator_point.x_coordinate.multiply_modular(&z_inverse_squared);
    let affine_y = generator_point
        .y_coordinate
        .multiply_modular(&z_inverse_squared.multiply_modular(&z_inverse));
    (affine_x, affine_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_mul_of_one_matches_generator_point() {
        let one = Scalar::from_u64(1);
        let point = seed_mul(&one).unwrap();
        let z_inverse = point.z_coordinate.invert().unwrap();
        let compressed = point.to_compressed_sec1_with_inverse(&z_inverse).unwrap();

        let mut one_bytes = [0u8; 32];
        one_bytes[31] = 1;
        let expected_generator = secp256k1::PublicKey::from_secret_key(
            global_context(),
            &secp256k1::SecretKey::from_slice(&one_bytes).unwrap(),
        );
        assert_eq!(compressed.to_vec(), expected_generator.serialize().to_vec());
    }

    #[test]
    fn seed_mul_is_deterministic() {
        let scalar = Scalar::from_u64(123456789);
        let first = seed_mul(&scalar).unwrap();
        let second = seed_mul(&scalar).unwrap();
        assert_eq!(first, second);
    }
}
