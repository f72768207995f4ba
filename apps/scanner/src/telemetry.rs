// [apps/scanner/src/telemetry.rs]
//! Inicialización del logging estructurado (grounded on
//! `libs/shared/heimdall::init_tracing`).

use tracing_subscriber::EnvFilter;

/// Inicializa `tracing-subscriber` una única vez al arranque del proceso.
///
/// Respeta `RUST_LOG` vía [`EnvFilter`]; por defecto reporta a nivel `info`.
/// Los hilos trabajadores no emiten logs por clave examinada — solo eventos
/// de ciclo de vida (arranque, resultado del auto-test, hallazgo,
/// cancelación, pánico de trabajador).
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
