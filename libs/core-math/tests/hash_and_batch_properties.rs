// [libs/core-math/tests/hash_and_batch_properties.rs]
//! Propiedades 1 y 2 de la especificación: correctud del hash160
//! especializado contra `sha2`/`ripemd`, y acuerdo entre la caminata por
//! lote y la multiplicación escalar directa para `N` en `{1, 2, 4, 2048}`.

use proptest::prelude::*;
use puzzle71_core_math::curve::UnifiedCurveEngine;
use puzzle71_core_math::field::FieldElement;
use puzzle71_core_math::generator::seed_mul;
use puzzle71_core_math::hashing::hash160_of_compressed_pubkey;
use puzzle71_core_math::point::JacobianPoint;
use puzzle71_core_math::scalar::Scalar;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

fn reference_hash160(compressed_pubkey: &[u8; 33]) -> [u8; 20] {
    let sha_digest = Sha256::digest(compressed_pubkey);
    let ripemd_digest = Ripemd160::digest(sha_digest);
    ripemd_digest.into()
}

fn affine_of(point: JacobianPoint) -> (FieldElement, FieldElement) {
    let z_inverse = point.z_coordinate.invert().unwrap();
    let z_inverse_squared = z_inverse.square_modular();
    (
        point.x_coordinate.multiply_modular(&z_inverse_squared),
        point.y_coordinate.multiply_modular(&z_inverse_squared.multiply_modular(&z_inverse)),
    )
}

proptest! {
    /// Propiedad 1: el hash160 especializado (SHA-256 + RIPEMD-160 de
    /// longitud fija, escritos a mano) debe coincidir byte a byte con la
    /// composición de los crates de referencia `sha2`/`ripemd`, para
    /// cualquier clave pública comprimida válida.
    #[test]
    fn hash160_matches_reference_crates(private_key in 1u64..=u64::MAX) {
        let scalar = Scalar::from_u64(private_key);
        let point = seed_mul(&scalar).unwrap();
        let z_inverse = point.z_coordinate.invert().unwrap();
        let compressed = point.to_compressed_sec1_with_inverse(&z_inverse).unwrap();

        prop_assert_eq!(hash160_of_compressed_pubkey(&compressed), reference_hash160(&compressed));
    }
}

/// Propiedad 2: caminar `N` pasos sumando el generador de forma secuencial
/// debe coincidir con `seed_mul(base + N)` calculado directamente, para
/// `N` en `{1, 2, 4, 2048}` — los tamaños de lote relevantes al motor.
#[test]
fn batch_walk_agrees_with_direct_scalar_multiplication_for_representative_sizes() {
    for &batch_length in &[1usize, 2, 4, 2048] {
        let base_private_key: u64 = 1_000_000_007;
        let base_scalar = Scalar::from_u64(base_private_key);

        let generator_point = seed_mul(&Scalar::from_u64(1)).unwrap();
        let (generator_affine_x, generator_affine_y) = affine_of(generator_point);

        let mut walked_point = seed_mul(&base_scalar).unwrap();
        for _ in 0..batch_length {
            walked_point =
                UnifiedCurveEngine::add_mixed_deterministic(&walked_point, &generator_affine_x, &generator_affine_y);
        }

        let direct_scalar = base_scalar.add_u64(batch_length as u64);
        let direct_point = seed_mul(&direct_scalar).unwrap();

        assert_eq!(
            affine_of(walked_point),
            affine_of(direct_point),
            "batch walk of length {batch_length} diverged from direct scalar multiplication"
        );
    }
}

/// Propiedad 2 (variante por lote): invertir un lote completo de
/// coordenadas `Z` vía `batch_invert_into` y proyectar cada punto a su
/// clave pública comprimida debe coincidir, punto por punto, con invertir
/// cada `Z` individualmente.
#[test]
fn batch_inversion_projection_matches_individual_inversion_for_a_full_batch() {
    const BATCH_LENGTH: usize = 2048;

    let generator_point = seed_mul(&Scalar::from_u64(1)).unwrap();
    let (generator_affine_x, generator_affine_y) = affine_of(generator_point);

    let mut points = Vec::with_capacity(BATCH_LENGTH);
    let mut walking_point = seed_mul(&Scalar::from_u64(3_141_592_653)).unwrap();
    for _ in 0..BATCH_LENGTH {
        walking_point =
            UnifiedCurveEngine::add_mixed_deterministic(&walking_point, &generator_affine_x, &generator_affine_y);
        points.push(walking_point);
    }

    let z_coordinates: Vec<FieldElement> = points.iter().map(|point| point.z_coordinate).collect();
    let mut batch_inverses = vec![FieldElement::default(); BATCH_LENGTH];
    let mut scratch = vec![FieldElement::default(); BATCH_LENGTH];
    FieldElement::batch_invert_into(&z_coordinates, &mut batch_inverses, &mut scratch).unwrap();

    for (index, point) in points.iter().enumerate() {
        let individually_inverted = point.z_coordinate.invert().unwrap();
        assert_eq!(batch_inverses[index], individually_inverted);

        let batch_compressed = point.to_compressed_sec1_with_inverse(&batch_inverses[index]).unwrap();
        let individual_compressed = point.to_compressed_sec1_with_inverse(&individually_inverted).unwrap();
        assert_eq!(batch_compressed, individual_compressed);
    }
}
