// [apps/scanner/src/rng.rs]
//! Selección de semillas aleatorias para cada trabajador.
//!
//! Cada trabajador obtiene su propio generador, sembrado con entropía del
//! sistema operativo mezclada con su índice (§4.4/§9 "Seed distribution"),
//! de modo que dos trabajadores nunca corren el riesgo de compartir estado
//! de generador incluso si la llamada al sistema operativo coincide en el
//! tiempo.

use crate::errors::ScannerError;
use puzzle71_core_math::scalar::Scalar;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};

/// Obtiene un `u64` de entropía real del sistema operativo.
///
/// # Errors
/// Retorna [`ScannerError::EntropyUnavailable`] si el sistema operativo
/// rechaza la solicitud de entropía (§7 "Entropy unavailable").
pub fn gather_os_entropy_u64() -> Result<u64, ScannerError> {
    OsRng.try_next_u64().map_err(|_| ScannerError::EntropyUnavailable)
}

/// Construye un generador pseudoaleatorio propio de un trabajador, sembrado
/// con entropía del sistema operativo mezclada con su índice.
///
/// # Errors
/// Propaga [`ScannerError::EntropyUnavailable`] si no se pudo leer entropía.
pub fn seeded_rng_for_worker(worker_index: u16) -> Result<StdRng, ScannerError> {
    let os_entropy = gather_os_entropy_u64()?;
    let salted_seed = os_entropy ^ (u64::from(worker_index).rotate_left(17));
    Ok(StdRng::seed_from_u64(salted_seed))
}

/// Elige un escalar aleatorio uniforme en `[range_low, range_high)`.
///
/// # Errors
/// Retorna [`ScannerError::EntropyUnavailable`] en el caso degenerado de que
/// el escalar muestreado sea cero (solo posible si `range_low == 0`, lo cual
/// no ocurre para el rango real del rompecabezas #71, pero se maneja para
/// no entrar en pánico en pruebas con rangos plantados arbitrarios).
pub fn random_scalar_in_range(
    random_generator: &mut StdRng,
    range_low: u128,
    range_high: u128,
) -> Result<Scalar, ScannerError> {
    let sampled_value: u128 = random_generator.gen_range(range_low..range_high);
    let mut be_bytes = [0u8; 32];
    be_bytes[16..32].copy_from_slice(&sampled_value.to_be_bytes());
    Scalar::from_u256_be(&be_bytes).map_err(|_| ScannerError::EntropyUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampled_scalar_stays_within_requested_range() {
        let mut rng = seeded_rng_for_worker(0).expect("OS entropy should be available in CI");
        for _ in 0..64 {
            let scalar = random_scalar_in_range(&mut rng, 1u128 << 70, 1u128 << 71).unwrap();
            let value = u128::from_be_bytes(scalar.to_u256_be()[16..32].try_into().unwrap());
            assert!(value >= 1u128 << 70);
            assert!(value < 1u128 << 71);
        }
    }

    #[test]
    fn different_worker_indices_usually_diverge() {
        let mut rng_a = seeded_rng_for_worker(1).unwrap();
        let mut rng_b = seeded_rng_for_worker(2).unwrap();
        let a = random_scalar_in_range(&mut rng_a, 1u128 << 70, 1u128 << 71).unwrap();
        let b = random_scalar_in_range(&mut rng_b, 1u128 << 70, 1u128 << 71).unwrap();
        assert_ne!(a, b);
    }
}
