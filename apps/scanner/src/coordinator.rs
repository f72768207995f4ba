// [apps/scanner/src/coordinator.rs]
//! El coordinador: arranca los trabajadores, instala el manejador de
//! `Ctrl-C`, y reacciona al hallazgo o a la cancelación (§4.5).
//!
//! Grounded on `apps/miner-worker/src/main.rs` y `engine.rs`'s patrón de
//! arranque/espera de hilos, adaptado de su variante `tokio` a `std::thread`
//! puro, según exige `spec.md` §5 para el camino caliente.

use crate::errors::ScannerError;
use crate::found_record::FoundRecord;
use crate::stats::spawn_stats_sampler;
use crate::target::SearchTarget;
use crate::worker::{run_worker_loop, WorkerSharedState, BATCH_SIZE, NUM_BATCHES_PER_CHUNK};
use puzzle71_core_gen::address::compressed_pubkey_to_p2pkh_address;
use puzzle71_core_math::generator::seed_mul;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// El desenlace de una corrida completa del escáner.
#[derive(Debug)]
pub enum ScanOutcome {
    /// Un trabajador encontró la clave; el registro de hallazgo ya fue
    /// escrito a disco.
    Found(FoundRecord),
    /// El usuario interrumpió la búsqueda (`Ctrl-C`) antes de hallar nada.
    Cancelled,
    /// Todos los trabajadores agotaron el rango de búsqueda sin éxito (solo
    /// alcanzable en la práctica con rangos de prueba acotados).
    RangeExhausted,
}

/// Arranca `worker_count` hilos trabajadores contra `target`, instala el
/// manejador de `Ctrl-C`, y bloquea hasta que la búsqueda termine.
///
/// # Errors
/// Propaga errores de escritura del registro de hallazgo
/// ([`ScannerError::FoundRecordWriteFailed`]) o de falta de entropía del
/// sistema operativo ([`ScannerError::EntropyUnavailable`]) que cualquier
/// trabajador haya encontrado.
pub fn run_scan(
    worker_count: u16,
    target: &SearchTarget,
    found_path: &PathBuf,
    backup_paths: &[PathBuf],
) -> Result<ScanOutcome, ScannerError> {
    run_scan_with_batch_dimensions(worker_count, target, found_path, backup_paths, BATCH_SIZE, NUM_BATCHES_PER_CHUNK)
}

/// Igual que [`run_scan`], pero con `batch_size`/`num_batches_per_chunk`
/// explícitos: usado por las pruebas de integración para acotar el espacio
/// de búsqueda por lote y correr la suite en milisegundos en vez de horas.
pub fn run_scan_with_batch_dimensions(
    worker_count: u16,
    target: &SearchTarget,
    found_path: &PathBuf,
    backup_paths: &[PathBuf],
    batch_size: usize,
    num_batches_per_chunk: usize,
) -> Result<ScanOutcome, ScannerError> {
    let keys_checked = Arc::new(AtomicU64::new(0));
    // Un único flag de parada: lo activa cualquier trabajador que encuentre
    // la clave, y también el manejador de `Ctrl-C`. `cancelled_by_user`
    // distingue después cuál de los dos fue la causa.
    let stop_flag = Arc::new(AtomicBool::new(false));
    let cancelled_by_user = Arc::new(AtomicBool::new(false));
    let found_key_slot = Arc::new(Mutex::new(None));

    install_ctrlc_handler(Arc::clone(&stop_flag), Arc::clone(&cancelled_by_user));

    let stats_handle = spawn_stats_sampler(Arc::clone(&keys_checked), Arc::clone(&stop_flag));

    let mut worker_handles = Vec::with_capacity(worker_count as usize);
    for worker_index in 0..worker_count {
        let worker_target = target.clone();
        let shared_state = WorkerSharedState {
            keys_checked: Arc::clone(&keys_checked),
            found_flag: Arc::clone(&stop_flag),
            found_key_slot: Arc::clone(&found_key_slot),
        };

        match std::thread::Builder::new()
            .name(format!("scanner-worker-{worker_index}"))
            .spawn(move || run_worker_loop(worker_index, &worker_target, &shared_state, batch_size, num_batches_per_chunk))
        {
            Ok(handle) => worker_handles.push(handle),
            Err(spawn_error) => {
                // §7 "Resource errors": log and continue with the remaining
                // workers; a single worker slot never aborts the coordinator.
                tracing::warn!(worker_index, error = %spawn_error, "failed to spawn scanner worker thread, skipping this worker slot");
            }
        }
    }

    for (worker_index, handle) in worker_handles.into_iter().enumerate() {
        match handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(worker_error)) => {
                tracing::warn!(worker_index, error = %worker_error, "worker thread returned an error");
            }
            Err(_panic_payload) => {
                tracing::warn!(worker_index, "worker thread panicked");
            }
        }
    }

    stop_flag.store(true, Ordering::Release);
    let _ = stats_handle.join();

    if cancelled_by_user.load(Ordering::Acquire) && found_key_slot.lock().expect("found-key mutex poisoned").is_none() {
        return Ok(ScanOutcome::Cancelled);
    }

    let found_key = found_key_slot.lock().expect("found-key mutex poisoned").take();
    match found_key {
        Some(found) => {
            let private_key_bytes = found.private_scalar.to_u256_be();
            let seed_point = seed_mul(&found.private_scalar).map_err(ScannerError::SelfTestFailed)?;
            let z_inverse = seed_point.z_coordinate.invert().map_err(ScannerError::SelfTestFailed)?;
            let compressed = seed_point
                .to_compressed_sec1_with_inverse(&z_inverse)
                .map_err(ScannerError::SelfTestFailed)?;
            let address = compressed_pubkey_to_p2pkh_address(&compressed);
            let hash160_hex = hex::encode(target.target_hash160);

            let record = FoundRecord::new(private_key_bytes, address, hash160_hex, found.keys_checked_at_discovery);
            record.write_to_path(found_path, backup_paths)?;
            Ok(ScanOutcome::Found(record))
        }
        None => Ok(ScanOutcome::RangeExhausted),
    }
}

/// Instala el manejador de `Ctrl-C`: activa `stop_flag` (deteniendo a todos
/// los trabajadores) y marca `cancelled_by_user` para que el coordinador
/// distinga una interrupción de un hallazgo real.
///
/// Grounded on the teacher's `main.rs` signal-handling setup, swapped from
/// `tokio::signal::ctrl_c` to the synchronous `ctrlc` crate per §5.
fn install_ctrlc_handler(stop_flag: Arc<AtomicBool>, cancelled_by_user: Arc<AtomicBool>) {
    if let Err(setup_error) = ctrlc::set_handler(move || {
        cancelled_by_user.store(true, Ordering::Release);
        stop_flag.store(true, Ordering::Release);
    }) {
        tracing::warn!(error = %setup_error, "failed to install Ctrl-C handler; interruption will not be graceful");
    }
}
