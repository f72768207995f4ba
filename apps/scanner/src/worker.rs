// [apps/scanner/src/worker.rs]
//! El trabajador del escáner: selecciona una semilla aleatoria, camina
//! secuencialmente sumando el generador, invierte el lote, y compara cada
//! hash160 contra el objetivo (§4.4).
//!
//! Grounded on `libs/domain/mining-strategy/src/engines/sequential_engine.rs`'s
//! estructura de magazine/flush, simplificada de su variante SIMD de 4
//! carriles a la caminata secuencial de un solo carril que pide `spec.md`.

use crate::errors::ScannerError;
use crate::rng::{random_scalar_in_range, seeded_rng_for_worker};
use crate::target::SearchTarget;
use puzzle71_core_math::curve::UnifiedCurveEngine;
use puzzle71_core_math::generator::seed_mul;
use puzzle71_core_math::hashing::hash160_of_compressed_pubkey;
use puzzle71_core_math::scalar::Scalar;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Cuántos puntos Jacobianos se acumulan antes de invertir el lote de `Z`
/// coordenadas de una sola vez (§4.2).
pub const BATCH_SIZE: usize = 2048;

/// Cuántos lotes conforman un "chunk": el trabajador re-muestrea una nueva
/// semilla aleatoria cada `CHUNK_SIZE` claves examinadas (§4.4).
pub const NUM_BATCHES_PER_CHUNK: usize = 64;

/// El resultado de una clave encontrada: el escalar exacto y cuántas claves
/// se habían examinado globalmente en el instante del hallazgo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundKey {
    pub private_scalar: Scalar,
    pub keys_checked_at_discovery: u64,
}

/// Las señales compartidas que cada trabajador observa y actualiza.
pub struct WorkerSharedState {
    pub keys_checked: Arc<AtomicU64>,
    pub found_flag: Arc<AtomicBool>,
    pub found_key_slot: Arc<std::sync::Mutex<Option<FoundKey>>>,
}

/// Ejecuta el bucle principal de un trabajador hasta que `found_flag` se
/// active (por este trabajador o por otro) o el rango de búsqueda se agote.
///
/// `batch_size` y `num_batches_per_chunk` son parámetros explícitos (en vez
/// de constantes fijas) para que las pruebas puedan acotarlos a valores
/// diminutos sin depender de estado compartido entre hilos: cada hilo
/// trabajador recibe su propia copia por valor al arrancar.
///
/// # Errors
/// Retorna [`ScannerError::EntropyUnavailable`] si el sistema operativo deja
/// de entregar entropía para sembrar una nueva semilla de chunk.
pub fn run_worker_loop(
    worker_index: u16,
    target: &SearchTarget,
    shared_state: &WorkerSharedState,
    batch_size: usize,
    num_batches_per_chunk: usize,
) -> Result<(), ScannerError> {
    let mut random_generator = seeded_rng_for_worker(worker_index)?;

    tracing::info!(worker_index, "worker starting");

    let chunk_size = batch_size as u128 * num_batches_per_chunk as u128;

    while !shared_state.found_flag.load(Ordering::Acquire) {
        if target.range_high <= target.range_low || target.range_high - target.range_low < chunk_size {
            // No seed can satisfy "seed <= HIGH - CHUNK_SIZE + 1" (§3):
            // the remaining range cannot fit a whole chunk.
            break;
        }

        // Reject seeds whose chunk would run past `range_high` (§4.4.1):
        // draw uniformly only from seeds whose entire chunk fits in-range.
        let seed_upper_bound_exclusive = target.range_high - chunk_size + 1;
        let chunk_seed_scalar =
            random_scalar_in_range(&mut random_generator, target.range_low, seed_upper_bound_exclusive)?;
        let seed_point = match seed_mul(&chunk_seed_scalar) {
            Ok(point) => point,
            Err(_) => continue,
        };

        let mut base_scalar = chunk_seed_scalar;
        let mut walking_point = seed_point;

        for _ in 0..num_batches_per_chunk {
            if shared_state.found_flag.load(Ordering::Acquire) {
                return Ok(());
            }

            // Motor de ráfagas (§4.2): camina `batch_size + 1` puntos y
            // retiene solo los primeros `batch_size` para este lote; el
            // punto extra se vuelve el punto de partida del lote siguiente,
            // para que la caminata nunca repita ni salte un punto en el
            // límite entre dos lotes.
            let extended_batch = UnifiedCurveEngine::walk_batch(walking_point, batch_size + 1);
            walking_point = *extended_batch.last().expect("batch_size + 1 is always > 0");
            let jacobian_batch = &extended_batch[..batch_size];

            let Ok(compressed_batch) = UnifiedCurveEngine::to_affine_batch(jacobian_batch) else {
                // Una coordenada Z nula en el lote es un estado degenerado
                // irrecuperable para este lote: se descarta y se continúa
                // con la siguiente semilla de chunk en vez de propagar un
                // error fatal (§7 "Degenerate EC step").
                break;
            };

            for (offset, compressed) in compressed_batch.iter().enumerate() {
                let candidate_hash160 = hash160_of_compressed_pubkey(compressed);

                if target.matches(&candidate_hash160) {
                    let found_scalar = base_scalar.add_u64(offset as u64);
                    let keys_checked_at_discovery = shared_state.keys_checked.load(Ordering::Relaxed);
                    *shared_state.found_key_slot.lock().expect("found-key mutex poisoned") =
                        Some(FoundKey { private_scalar: found_scalar, keys_checked_at_discovery });
                    shared_state.found_flag.store(true, Ordering::Release);
                    tracing::info!(worker_index, "worker found the target key");
                    return Ok(());
                }
            }

            shared_state.keys_checked.fetch_add(batch_size as u64, Ordering::Relaxed);
            base_scalar = base_scalar.add_u64(batch_size as u64);
        }
    }

    tracing::info!(worker_index, "worker stopping");
    Ok(())
}
