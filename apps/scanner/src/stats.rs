// [apps/scanner/src/stats.rs]
//! El muestreador de estadísticas: su propio hilo, independiente de los
//! trabajadores, que reporta la tasa de exploración periódicamente (§4.6).

use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Intervalo de muestreo, en segundos, entre dos líneas de progreso
/// consecutivas.
const STATS_INTERVAL_SECONDS: u64 = 5;

/// Lanza el hilo muestreador. Retorna su `JoinHandle`; el hilo termina tan
/// pronto `cancellation_flag` se pone en `true` (sea por hallazgo o por
/// `Ctrl-C`).
///
/// No se mantiene ningún lock mientras el hilo duerme: únicamente lee
/// atómicos.
pub fn spawn_stats_sampler(keys_checked: Arc<AtomicU64>, cancellation_flag: Arc<AtomicBool>) -> JoinHandle<()> {
    std::thread::Builder::new()
        .name("stats-sampler".to_string())
        .spawn(move || run_stats_sampler_loop(&keys_checked, &cancellation_flag))
        .expect("failed to spawn the stats sampler thread")
}

/// Granularidad del sondeo de cancelación mientras se espera el siguiente
/// intervalo de reporte: mantiene el hilo receptivo a `Ctrl-C` sin
/// mantener ningún lock ni despertar más seguido de lo necesario.
const CANCELLATION_POLL_INTERVAL: Duration = Duration::from_millis(100);

fn run_stats_sampler_loop(keys_checked: &Arc<AtomicU64>, cancellation_flag: &Arc<AtomicBool>) {
    let start_instant = Instant::now();
    let mut previous_checked = 0u64;
    let mut previous_instant = start_instant;

    'sampling: while !cancellation_flag.load(Ordering::Acquire) {
        let mut slept = Duration::ZERO;
        let report_interval = Duration::from_secs(STATS_INTERVAL_SECONDS);
        while slept < report_interval {
            std::thread::sleep(CANCELLATION_POLL_INTERVAL);
            slept += CANCELLATION_POLL_INTERVAL;
            if cancellation_flag.load(Ordering::Acquire) {
                break 'sampling;
            }
        }

        let current_checked = keys_checked.load(Ordering::Relaxed);
        let now = Instant::now();

        let total_elapsed_seconds = now.duration_since(start_instant).as_secs_f64().max(f64::EPSILON);
        let interval_elapsed_seconds = now.duration_since(previous_instant).as_secs_f64().max(f64::EPSILON);

        let average_mkeys_per_second = (current_checked as f64 / total_elapsed_seconds) / 1_000_000.0;
        let instantaneous_mkeys_per_second =
            ((current_checked.saturating_sub(previous_checked)) as f64 / interval_elapsed_seconds) / 1_000_000.0;

        println!(
            "[{:.0}] Checked: {} | Avg: {:.2} Mkey/s | Now: {:.2} Mkey/s",
            total_elapsed_seconds, current_checked, average_mkeys_per_second, instantaneous_mkeys_per_second
        );
        let _ = std::io::stdout().flush();

        previous_checked = current_checked;
        previous_instant = now;
    }
}
